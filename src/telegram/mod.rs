mod api;
mod poller;
mod sink;
mod types;

pub use api::TelegramApi;
pub use poller::run_polling;
