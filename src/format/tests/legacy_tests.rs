//! Tests for schema detection and the three read paths.

use csv::StringRecord;

use super::small_schema;
use crate::format::{LabelSchema, read_labels, read_labels_from};
use crate::model::{FrameKey, StructureSchema};

const CURRENT_CSV: &str = "\
video,swallow,frame,LPW_PPW_sev,LPW_PPW_vis,B_sev,B_vis,VT_sev,VT_vis
1,1,1,2,1,0,0,3,0
1,1,2,2,1,0,1,3,1
";

const VAL_OVERRIDDEN_CSV: &str = "\
video,swallow,frame,LPW_PPW_val,LPW_PPW_overridden,B_val,B_overridden,VT_val,VT_overridden
1,1,1,1,1,0,0,0,1
1,1,2,1,1,1,1,1,1
";

const PLAIN_CSV: &str = "\
video,swallow,frame,LPW_PPW,B,VT
1,1,1,1,0,0
1,1,2,1,1,1
";

fn header(cells: &[&str]) -> StringRecord {
    StringRecord::from(cells.to_vec())
}

#[test]
fn test_detect_current_schema() {
    let schema = small_schema();
    let detected = LabelSchema::detect(
        &header(&[
            "video", "swallow", "frame", "LPW_PPW_sev", "LPW_PPW_vis", "B_sev", "B_vis",
            "VT_sev", "VT_vis",
        ]),
        &schema,
    );
    assert_eq!(
        detected,
        LabelSchema::Current {
            columns: vec![4, 6, 8]
        }
    );
}

#[test]
fn test_detect_value_overridden_schema() {
    let schema = small_schema();
    let detected = LabelSchema::detect(
        &header(&[
            "video",
            "swallow",
            "frame",
            "LPW_PPW_val",
            "LPW_PPW_overridden",
            "B_val",
            "B_overridden",
            "VT_val",
            "VT_overridden",
        ]),
        &schema,
    );
    assert_eq!(
        detected,
        LabelSchema::ValueOverridden {
            columns: vec![3, 5, 7]
        }
    );
}

#[test]
fn test_detect_falls_back_to_plain() {
    let schema = small_schema();
    let detected = LabelSchema::detect(
        &header(&["video", "swallow", "frame", "LPW_PPW", "B", "VT"]),
        &schema,
    );
    assert_eq!(detected, LabelSchema::Plain { width: 3 });
}

#[test]
fn test_partial_vis_columns_are_not_current_schema() {
    let schema = small_schema();
    let detected = LabelSchema::detect(
        &header(&["video", "swallow", "frame", "LPW_PPW_vis", "B", "VT"]),
        &schema,
    );
    assert_eq!(detected, LabelSchema::Plain { width: 3 });
}

#[test]
fn test_current_schema_reads_vis_columns() {
    let labels = read_labels_from(CURRENT_CSV.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![1, 0, 0]);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 2)).unwrap().bits(), vec![1, 1, 1]);
}

#[test]
fn test_current_schema_uses_header_positions() {
    let reordered = "\
video,swallow,frame,VT_vis,VT_sev,B_vis,B_sev,LPW_PPW_vis,LPW_PPW_sev
2,3,4,1,4,0,0,1,2
";
    let labels = read_labels_from(reordered.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(2, 3, 4)).unwrap().bits(), vec![1, 0, 1]);
}

#[test]
fn test_value_overridden_schema_reads_value_columns() {
    let labels = read_labels_from(VAL_OVERRIDDEN_CSV.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![1, 0, 0]);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 2)).unwrap().bits(), vec![1, 1, 1]);
}

#[test]
fn test_plain_schema_reads_columns_after_keys() {
    let labels = read_labels_from(PLAIN_CSV.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![1, 0, 0]);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 2)).unwrap().bits(), vec![1, 1, 1]);
}

#[test]
fn test_all_schemas_produce_identical_stores() {
    let schema = small_schema();
    let current = read_labels_from(CURRENT_CSV.as_bytes(), &schema).unwrap();
    let overridden = read_labels_from(VAL_OVERRIDDEN_CSV.as_bytes(), &schema).unwrap();
    let plain = read_labels_from(PLAIN_CSV.as_bytes(), &schema).unwrap();

    assert_eq!(current, overridden);
    assert_eq!(current, plain);
}

#[test]
fn test_plain_schema_not_a_number_reads_as_zero() {
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT
1,1,1,1,N/A,1
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![1, 0, 1]);
}

#[test]
fn test_plain_schema_short_row_pads_with_zero() {
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT
1,1,1,1
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![1, 0, 0]);
}

#[test]
fn test_values_other_than_one_are_not_visible() {
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT
1,1,1,2,-1, 1 
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![0, 0, 1]);
}

#[test]
fn test_rows_with_bad_keys_are_skipped() {
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT
# exported by hand,,,,,
x,1,1,1,1,1
1,1,1,0,1,0
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![0, 1, 0]);
}

#[test]
fn test_current_schema_malformed_cell_skips_row() {
    let csv = "\
video,swallow,frame,LPW_PPW_sev,LPW_PPW_vis,B_sev,B_vis,VT_sev,VT_vis
1,1,1,2,yes,0,0,3,0
1,1,2,2,1,0,0,3,0
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert!(!labels.contains(&FrameKey::new(1, 1, 1)));
    assert!(labels.contains(&FrameKey::new(1, 1, 2)));
}

#[test]
fn test_repeated_key_later_row_wins() {
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT
1,1,1,1,1,1
1,1,1,0,0,1
";
    let labels = read_labels_from(csv.as_bytes(), &small_schema()).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels.get(&FrameKey::new(1, 1, 1)).unwrap().bits(), vec![0, 0, 1]);
}

#[test]
fn test_empty_input_yields_empty_store() {
    let labels = read_labels_from("".as_bytes(), &small_schema()).unwrap();
    assert!(labels.is_empty());

    let header_only = "video,swallow,frame,LPW_PPW,B,VT\n";
    let labels = read_labels_from(header_only.as_bytes(), &small_schema()).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn test_reference_schema_plain_file() {
    let schema = StructureSchema::reference();
    let csv = "\
video,swallow,frame,LPW_PPW,B,VT,LC_LP,RC_RP,PCR,LA_LAF,RA_RAF,IAS,LSE,LSAF_FVF,AC_TVF_PC
3,2,15,1,0,0,0,0,0,0,0,0,0,0,1
";
    let labels = read_labels_from(csv.as_bytes(), &schema).unwrap();
    let bits = labels.get(&FrameKey::new(3, 2, 15)).unwrap().bits();
    assert_eq!(bits.len(), 12);
    assert_eq!(bits[0], 1);
    assert_eq!(bits[11], 1);
    assert_eq!(bits.iter().filter(|b| **b == 1).count(), 2);
}

#[test]
fn test_read_labels_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_labels(&dir.path().join("absent.csv"), &small_schema()).unwrap_err();
    assert!(matches!(err, crate::format::FormatError::Io(_)));
}
