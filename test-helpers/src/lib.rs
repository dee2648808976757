pub mod mock;

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub use mock::{MockClient, RecordedRequest};

/// Route logs from tests to the test writer. Safe to call from every test.
///
/// Set `RUST_LOG` to see more than errors.
pub fn init_test_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer());

    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// A single-threaded executor standing in for the UI framework's task queue.
///
/// Spawned continuations only run when the test calls [`Self::run`], so the
/// state in between is observable.
#[derive(Clone, Default)]
pub struct TaskQueue {
    pool: Rc<RefCell<LocalPool>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spawner to hand to a query runner.
    pub fn spawner(&self) -> impl Fn(LocalBoxFuture<'static, ()>) + 'static {
        let spawner = self.pool.borrow().spawner();
        move |task| {
            spawner
                .spawn_local(task)
                .expect("task queue has been shut down");
        }
    }

    /// Run every task until none can make progress.
    pub fn run(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}
