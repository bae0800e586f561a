//! End-to-end pipeline tests over real staged files

use std::io::Write;
use std::path::PathBuf;

use premiser::premis::xml;
use premiser::{Error, Pipeline, PipelineConfig, Record, StagedUpload, UploadRequest};

const TEST_MD5: &str = "098f6bcd4621d373cade4e832627b4f6";

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default())
}

fn stage_bytes(content: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();
    (dir, path)
}

fn assert_links_symmetric(record: &Record) {
    for event in record.events() {
        for object_id in event.linking_object_identifiers() {
            let object = record
                .objects()
                .iter()
                .find(|o| o.identifier == *object_id)
                .expect("event links a missing object");
            assert!(
                object
                    .linking_event_identifiers()
                    .contains(&event.identifier),
                "object does not link back to event {}",
                event.identifier.value
            );
        }
    }
    for object in record.objects() {
        for event_id in object.linking_event_identifiers() {
            let event = record
                .events()
                .iter()
                .find(|e| e.identifier == *event_id)
                .expect("object links a missing event");
            assert!(
                event
                    .linking_object_identifiers()
                    .contains(&object.identifier),
                "event does not link back to object {}",
                object.identifier.value
            );
        }
    }
}

#[tokio::test]
async fn four_byte_scenario() {
    let (_dir, path) = stage_bytes(b"test");
    let request = UploadRequest {
        original_name: Some("test.txt".to_string()),
        client_md5: None,
    };
    let record = pipeline().build_record(&path, &request).await.unwrap();

    assert_eq!(record.objects().len(), 1);
    let object = &record.objects()[0];
    assert_eq!(object.characteristics.size, "4");
    assert_eq!(object.fixity("md5").unwrap().digest, TEST_MD5);
    assert_eq!(object.original_name.as_deref(), Some("test.txt"));

    let formats = &object.characteristics.formats;
    assert_eq!(formats.len(), 2);
    assert!(formats.iter().any(|f| f.designation == "text/plain"
        && f.note.contains("extension")));

    assert_eq!(record.events().len(), 1);
    assert_eq!(record.events()[0].event_type, "description");
    assert_links_symmetric(&record);
}

#[tokio::test]
async fn rerun_is_deterministic_modulo_identifiers_and_time() {
    let (_dir, path) = stage_bytes(b"some stable content\n");
    let request = UploadRequest {
        original_name: Some("stable.txt".to_string()),
        client_md5: None,
    };
    let p = pipeline();
    let first = p.build_record(&path, &request).await.unwrap();
    let second = p.build_record(&path, &request).await.unwrap();

    let a = &first.objects()[0];
    let b = &second.objects()[0];
    assert_eq!(a.characteristics.fixities, b.characteristics.fixities);
    assert_eq!(a.characteristics.formats, b.characteristics.formats);
    assert_eq!(a.characteristics.size, b.characteristics.size);
    assert_ne!(a.identifier.value, b.identifier.value);
    assert_ne!(
        first.events()[0].identifier.value,
        second.events()[0].identifier.value
    );
}

#[tokio::test]
async fn unrecognized_content_without_name_is_undetected() {
    let (_dir, path) = stage_bytes(&[0x00, 0x01, 0xFE, 0xFF, 0x80]);
    let record = pipeline()
        .build_record(&path, &UploadRequest::default())
        .await
        .unwrap();

    let formats = &record.objects()[0].characteristics.formats;
    assert_eq!(formats.len(), 1);
    assert_eq!(formats[0].designation, "undetected");
}

#[tokio::test]
async fn fixity_match_extends_the_record() {
    let (_dir, path) = stage_bytes(b"test");
    let request = UploadRequest {
        original_name: Some("test.txt".to_string()),
        client_md5: Some(TEST_MD5.to_string()),
    };
    let document = pipeline().describe(&path, &request).await.unwrap();

    let text = String::from_utf8(document.bytes.clone()).unwrap();
    assert_eq!(text.matches("<event>").count(), 2);
    assert!(text.contains("fixity check"));

    let record = xml::from_xml(&document.bytes).unwrap();
    assert_eq!(record.events().len(), 2);
    assert_eq!(record.objects()[0].linking_event_identifiers().len(), 2);
    assert_links_symmetric(&record);
}

#[tokio::test]
async fn fixity_mismatch_yields_no_xml() {
    let (_dir, path) = stage_bytes(b"test");
    let request = UploadRequest {
        original_name: None,
        client_md5: Some("00000000000000000000000000000000".to_string()),
    };
    let err = pipeline().describe(&path, &request).await.unwrap_err();
    assert!(matches!(err, Error::FixityMismatch { .. }));
}

#[tokio::test]
async fn xml_round_trip_recovers_the_record() {
    let (_dir, path) = stage_bytes(b"round trip me");
    let request = UploadRequest {
        original_name: Some("notes.md".to_string()),
        client_md5: None,
    };
    let p = pipeline();
    let record = p.build_record(&path, &request).await.unwrap();
    let bytes = xml::to_xml(&record).unwrap();
    let parsed = xml::from_xml(&bytes).unwrap();
    assert_eq!(parsed, record);
}

#[tokio::test]
async fn streamed_uploads_are_staged_and_cleaned_up() {
    let p = pipeline();
    let request = UploadRequest {
        original_name: Some("test.txt".to_string()),
        client_md5: Some(TEST_MD5.to_string()),
    };
    let document = p
        .describe_stream(&mut &b"test"[..], &request)
        .await
        .unwrap();
    assert_eq!(document.filename, "premis.xml");
    assert_eq!(document.content_type, "application/xml");
    assert!(!document.bytes.is_empty());
}

#[tokio::test]
async fn staged_artifact_removed_even_on_fixity_mismatch() {
    let parent = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        staging_dir: Some(parent.path().to_path_buf()),
        ..Default::default()
    };
    let p = Pipeline::new(config.clone());
    let request = UploadRequest {
        original_name: None,
        client_md5: Some("ffffffffffffffffffffffffffffffff".to_string()),
    };
    let err = p
        .describe_stream(&mut &b"test"[..], &request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FixityMismatch { .. }));

    let leftovers: Vec<_> = std::fs::read_dir(parent.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "staging directory not cleaned up");
}

#[tokio::test]
async fn missing_staged_path_is_a_staging_failure() {
    let err = pipeline()
        .describe(
            std::path::Path::new("/nonexistent/premiser-upload"),
            &UploadRequest::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Staging(_)));
}

#[tokio::test]
async fn staging_guard_reads_back_what_went_in() {
    let config = PipelineConfig::default();
    let staged = StagedUpload::stage(&config, &mut &b"guard me"[..])
        .await
        .unwrap();
    let record = pipeline()
        .build_record(staged.path(), &UploadRequest::default())
        .await
        .unwrap();
    assert_eq!(record.objects()[0].characteristics.size, "8");
}
