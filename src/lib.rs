pub mod board;
pub mod format;
pub mod logging;
pub mod remote;
pub mod settings;
pub mod shared;
pub mod storage;

pub use board::{BoardError, TaskBoard};
pub use format::{TaskList, TaskView};
pub use remote::{HttpTodoSource, Seeder, TodoSource};
pub use settings::AppSettings;
pub use shared::errors::{NetworkError, SeedError, StoreError};
pub use storage::types::{TaskPatch, TaskRecord};
pub use storage::TaskStore;

use shared::paths::{get_database_path, get_log_dir};

/// Run one headless app launch: seed on first start, otherwise read the
/// stored list, then print it.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _logging = logging::init_logging(&get_log_dir())?;

    let mut app_settings = settings::load_settings();
    if app_settings.needs_onboarding() {
        tracing::info!(target: "system", "Onboarding not shown in headless mode, marking as checked");
        app_settings.mark_onboarding_checked();
    }

    let store = TaskStore::open(get_database_path())?;
    let source = HttpTodoSource::new(&app_settings.remote_url)?;
    let board = TaskBoard::new(store, source);

    let list = board.launch(&mut app_settings).await?;
    settings::save_settings(&app_settings)?;

    println!("{}", list.count_label);
    for task in &list.tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("[{}] #{} {} ({})", mark, task.id, task.title, task.date);
    }

    Ok(())
}
