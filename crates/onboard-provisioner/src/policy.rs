//! Resource policy documents.
//!
//! Rendered as `serde_json::Value` so tests can assert on structure; the
//! adapters serialize to the string form the provider expects. Statement ids
//! are fixed strings, so a re-issued document is byte-identical to the first
//! and the repeated puts on the already-exists path are true no-ops.

use serde_json::{Value, json};

use onboard_core::naming::bucket_arn;

/// Grants the customer identity read/list on the bucket and its contents.
pub fn bucket_read_policy(bucket: &str, identity_arn: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "ConsumerRead",
                "Effect": "Allow",
                "Principal": {
                    "AWS": identity_arn
                },
                "Action": [
                    "s3:ListBucket",
                    "s3:GetObject",
                    "s3:GetObjectVersion"
                ],
                "Resource": [
                    bucket_arn(bucket),
                    format!("{}/*", bucket_arn(bucket))
                ]
            }
        ]
    })
}

/// Two grants: S3 may send object notifications into the queue, scoped by
/// source ARN to this one bucket, and the customer identity may consume
/// them.
pub fn queue_policy(queue_arn: &str, bucket: &str, identity_arn: &str) -> Value {
    json!({
        "Version": "2008-10-17",
        "Statement": [
            {
                "Sid": "__sender_statement",
                "Effect": "Allow",
                "Principal": {
                    "Service": "s3.amazonaws.com"
                },
                "Action": "SQS:SendMessage",
                "Resource": queue_arn,
                "Condition": {
                    "ArnLike": {
                        "aws:SourceArn": format!("arn:aws:s3:*:*:{bucket}")
                    }
                }
            },
            {
                "Sid": "__receiver_statement",
                "Effect": "Allow",
                "Principal": {
                    "AWS": identity_arn
                },
                "Action": [
                    "SQS:ChangeMessageVisibility",
                    "SQS:DeleteMessage",
                    "SQS:ReceiveMessage"
                ],
                "Resource": queue_arn
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: &str = "arn:aws:iam::123456789012:user/user@example.com";
    const QUEUE: &str = "arn:aws:sqs:us-east-2:123456789012:acme-test-123-queue";

    #[test]
    fn bucket_policy_grants_read_on_bucket_and_contents() {
        let doc = bucket_read_policy("acme-test-123", IDENTITY);
        let stmt = &doc["Statement"][0];

        assert_eq!(stmt["Sid"], "ConsumerRead");
        assert_eq!(stmt["Principal"]["AWS"], IDENTITY);
        assert_eq!(stmt["Resource"][0], "arn:aws:s3:::acme-test-123");
        assert_eq!(stmt["Resource"][1], "arn:aws:s3:::acme-test-123/*");
    }

    #[test]
    fn queue_policy_scopes_sender_to_the_one_bucket() {
        let doc = queue_policy(QUEUE, "acme-test-123", IDENTITY);
        let sender = &doc["Statement"][0];

        assert_eq!(sender["Principal"]["Service"], "s3.amazonaws.com");
        assert_eq!(sender["Resource"], QUEUE);
        assert_eq!(
            sender["Condition"]["ArnLike"]["aws:SourceArn"],
            "arn:aws:s3:*:*:acme-test-123"
        );
    }

    #[test]
    fn queue_policy_receiver_is_the_identity_on_the_queue_arn() {
        let doc = queue_policy(QUEUE, "acme-test-123", IDENTITY);
        let receiver = &doc["Statement"][1];

        assert_eq!(receiver["Principal"]["AWS"], IDENTITY);
        assert_eq!(receiver["Resource"], QUEUE);
        let actions = receiver["Action"].as_array().expect("action list");
        assert!(actions.iter().any(|a| a == "SQS:ReceiveMessage"));
        assert!(actions.iter().any(|a| a == "SQS:DeleteMessage"));
        assert!(actions.iter().any(|a| a == "SQS:ChangeMessageVisibility"));
    }

    #[test]
    fn documents_are_stable_across_renders() {
        assert_eq!(
            bucket_read_policy("acme-test-123", IDENTITY),
            bucket_read_policy("acme-test-123", IDENTITY),
        );
        assert_eq!(
            queue_policy(QUEUE, "acme-test-123", IDENTITY),
            queue_policy(QUEUE, "acme-test-123", IDENTITY),
        );
    }
}
