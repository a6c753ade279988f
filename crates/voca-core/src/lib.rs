//! Response shaping shared by every Voca function

mod response;
mod timestamp;

pub use response::{INTERNAL_ERROR_BODY, empty_response, json_response};
pub use timestamp::utc_timestamp;
