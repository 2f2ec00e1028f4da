use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use rusqlite::Connection;
use tokio::sync::oneshot;

use crate::shared::errors::StoreError;

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

/// Single-writer queue. One thread owns the write connection and runs jobs
/// in the order they were submitted.
pub struct WriteQueue {
    tx: Sender<Job>,
}

impl WriteQueue {
    /// Spawn the writer thread, handing it ownership of `conn`.
    pub fn spawn(conn: Connection) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();

        thread::Builder::new()
            .name("tasknest-writer".to_string())
            .spawn(move || writer_loop(conn, rx))?;

        Ok(Self { tx })
    }

    /// Queue `op` and wait for its result.
    ///
    /// Once queued the job always runs, even if the returned future is dropped.
    pub async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let job: Job = Box::new(move |conn| {
            let _ = reply_tx.send(op(conn));
        });

        self.tx.send(job).map_err(|_| StoreError::WriterClosed)?;
        reply_rx.await.map_err(|_| StoreError::WriterClosed)?
    }
}

fn writer_loop(mut conn: Connection, rx: Receiver<Job>) {
    tracing::debug!(target: "storage", "Writer thread started");

    while let Ok(job) = rx.recv() {
        job(&mut conn);
    }

    tracing::debug!(target: "storage", "Writer thread stopped");
}
