mod envelope;
pub use self::envelope::{ResponseWrapper, Status};
