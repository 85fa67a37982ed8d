//! Known service names and their audit-log event sources

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Services the simulated source picks from
pub const SERVICE_CATALOG: [&str; 14] = [
    "Amazon EC2",
    "Amazon S3",
    "Amazon RDS",
    "AWS Lambda",
    "Amazon CloudFront",
    "Amazon DynamoDB",
    "Amazon ECS",
    "Amazon SQS",
    "Amazon SNS",
    "AWS Fargate",
    "Amazon EKS",
    "Amazon ElastiCache",
    "Amazon Redshift",
    "AWS Glue",
];

/// Billing service name -> audit-log event source
static EVENT_SOURCES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Amazon EC2", "ec2.amazonaws.com"),
        ("Amazon S3", "s3.amazonaws.com"),
        ("Amazon RDS", "rds.amazonaws.com"),
        ("AWS Lambda", "lambda.amazonaws.com"),
        ("Amazon CloudFront", "cloudfront.amazonaws.com"),
        ("Amazon DynamoDB", "dynamodb.amazonaws.com"),
        ("Amazon ECS", "ecs.amazonaws.com"),
        ("Amazon SQS", "sqs.amazonaws.com"),
        ("Amazon SNS", "sns.amazonaws.com"),
        ("AWS Fargate", "ecs.amazonaws.com"),
        ("Amazon EKS", "eks.amazonaws.com"),
        ("Amazon ElastiCache", "elasticache.amazonaws.com"),
        ("Amazon Redshift", "redshift.amazonaws.com"),
        ("AWS Glue", "glue.amazonaws.com"),
        ("Amazon CloudWatch", "monitoring.amazonaws.com"),
        ("AWS Key Management Service", "kms.amazonaws.com"),
        ("Amazon Route 53", "route53.amazonaws.com"),
        ("Amazon API Gateway", "apigateway.amazonaws.com"),
        ("AWS Secrets Manager", "secretsmanager.amazonaws.com"),
        ("Amazon Elastic Load Balancing", "elasticloadbalancing.amazonaws.com"),
    ])
});

/// Audit-log event source for a billing service name
///
/// Services without an explicit mapping get a derived key: lowercased,
/// vendor words and spaces removed, `.amazonaws.com` appended.
pub fn event_source_for(service_name: &str) -> String {
    if let Some(source) = EVENT_SOURCES.get(service_name) {
        return (*source).to_string();
    }

    let simplified = service_name
        .to_lowercase()
        .replace("amazon ", "")
        .replace("aws ", "")
        .replace(' ', "");
    format!("{}.amazonaws.com", simplified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_sources() {
        assert_eq!(event_source_for("Amazon CloudWatch"), "monitoring.amazonaws.com");
        assert_eq!(event_source_for("AWS Fargate"), "ecs.amazonaws.com");
    }

    #[test]
    fn test_derived_source() {
        assert_eq!(event_source_for("Amazon Kinesis"), "kinesis.amazonaws.com");
        assert_eq!(event_source_for("AWS Step Functions"), "stepfunctions.amazonaws.com");
        assert_eq!(event_source_for("Tax"), "tax.amazonaws.com");
    }

    #[test]
    fn test_catalog_names_are_distinct_and_mapped() {
        let mut names = SERVICE_CATALOG.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SERVICE_CATALOG.len());
        assert!(SERVICE_CATALOG.iter().all(|name| EVENT_SOURCES.contains_key(name)));
    }
}
