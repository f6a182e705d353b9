pub mod backend;
pub mod contact;
pub mod image;
pub mod otp;
pub mod password;
pub mod signup;
pub mod username;

pub use backend::{BackendEvent, BackendOutcome, BackendRequest, MockBackend, TaskHandle, TaskId};
pub use contact::{Contact, ContactValidator, EmailPolicy};
pub use image::ImageService;
pub use username::UsernameRegistry;
