//! Mail messages and the folders that hold them.

mod folder;
mod model;

pub use folder::Folder;
pub use model::{MailMessage, MessageId, Priority};
