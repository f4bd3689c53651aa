pub use super::command_queue::Entity as CommandQueue;
pub use super::setting::Entity as Setting;
