pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RegisterRequest, ResetPasswordRequest};
pub use responses::{LoginResponse, UserInfoResponse};
