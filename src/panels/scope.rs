use std::{future::Future, sync::Mutex};

use tokio::task::{AbortHandle, JoinHandle};

/// Owns the in-flight tasks of a mounted panel. Dropping the scope (unmount)
/// aborts them, so a load resolving afterwards never writes panel state.
#[derive(Debug, Default)]
pub struct PanelScope {
    tasks: Mutex<Vec<AbortHandle>>,
}

impl PanelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|task| !task.is_finished());
            tasks.push(handle.abort_handle());
        }
        handle
    }

    pub fn abort_all(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

impl Drop for PanelScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[actix_web::test]
    async fn test_drop_aborts_tasks() {
        let scope = PanelScope::new();
        let handle = scope.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        drop(scope);

        assert!(handle.await.unwrap_err().is_cancelled());
    }

    #[actix_web::test]
    async fn test_finished_tasks_complete() {
        let scope = PanelScope::new();

        let handle = scope.spawn(async {});

        assert!(handle.await.is_ok());
    }
}
