// Copyright (c) 2025 - MV Consulting
//! ACM Certificate ARN for the CloudFront viewer certificate

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConstructError;

/// ARN of an existing ACM certificate
///
/// CloudFront only accepts viewer certificates issued in `us-east-1`, so any
/// other region is rejected up front rather than at deploy time.
///
/// Format: `arn:<partition>:acm:us-east-1:<12-digit account>:certificate/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateArn(String);

impl CertificateArn {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "certificateArn";

    /// The only region CloudFront reads viewer certificates from
    pub const CLOUDFRONT_REGION: &'static str = "us-east-1";

    pub fn new(arn: impl Into<String>) -> Result<Self, ConstructError> {
        let arn = arn.into();
        let invalid = |reason: &str| ConstructError::invalid_option(Self::FIELD, &arn, reason);

        let parts: Vec<&str> = arn.splitn(6, ':').collect();
        let [prefix, partition, service, region, account, resource] = parts[..] else {
            return Err(invalid("expected arn:<partition>:acm:<region>:<account>:certificate/<id>"));
        };

        if prefix != "arn" || !partition.starts_with("aws") {
            return Err(invalid("must start with arn:aws"));
        }
        if service != "acm" {
            return Err(invalid("must be an ACM certificate ARN"));
        }
        if region != Self::CLOUDFRONT_REGION {
            return Err(invalid("CloudFront requires the certificate to be in us-east-1"));
        }
        if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("account id must be 12 digits"));
        }
        match resource.strip_prefix("certificate/") {
            Some(id) if !id.is_empty() => {}
            _ => return Err(invalid("resource must be certificate/<id>")),
        }

        Ok(Self(arn))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Account that owns the certificate
    pub fn account(&self) -> &str {
        self.0.split(':').nth(4).unwrap_or_default()
    }
}

impl TryFrom<String> for CertificateArn {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CertificateArn> for String {
    fn from(value: CertificateArn) -> Self {
        value.0
    }
}

impl fmt::Display for CertificateArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
