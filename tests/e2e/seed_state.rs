//! Seed State Smoke Test
//!
//! Verifies the emulator's startup invariants without the service under
//! test: the picture bucket exists from the first moment and holds no
//! objects until the suite uploads one.

use shipment_e2e::config::HarnessConfig;
use shipment_e2e::emulator::Emulator;
use shipment_e2e::s3::BucketInspector;

use crate::skip_unless_e2e;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn emulator_loads_seeded_bucket() {
    skip_unless_e2e!();

    let config = HarnessConfig::load_or_default("harness.yaml").expect("Bad harness config");
    let emulator = Emulator::start(&config.emulator)
        .await
        .expect("Failed to start emulator");

    // In-container view: the bucket answers head-bucket
    let result = emulator
        .exec(&format!(
            "awslocal s3api head-bucket --bucket {}",
            config.bucket
        ))
        .await
        .expect("In-container head-bucket failed");
    assert!(
        result.success(),
        "head-bucket should exit 0, stderr: {}",
        result.stderr
    );

    // SDK view: bucket exists and is empty
    let inspector = BucketInspector::for_emulator(&emulator);
    assert!(inspector.bucket_exists(&config.bucket).await);

    let count = inspector
        .object_count(&config.bucket)
        .await
        .expect("ListObjects against the emulator failed");
    assert_eq!(count, 0, "Seeded bucket should start empty");
}
