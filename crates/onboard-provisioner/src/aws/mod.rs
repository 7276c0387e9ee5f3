//! SDK-backed implementations of the service traits.

pub mod iam;
pub mod s3;
pub mod sqs;

pub use iam::IamIdentityService;
pub use s3::S3StorageService;
pub use sqs::SqsQueueService;
