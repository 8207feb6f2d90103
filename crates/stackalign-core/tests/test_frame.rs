mod common;

use ndarray::Array2;

use common::constant_frame;
use stackalign_core::error::StackAlignError;
use stackalign_core::frame::{Frame, Stack};

#[test]
fn test_empty_stack_rejected() {
    let err = Stack::from_frames(vec![]).unwrap_err();
    assert!(matches!(err, StackAlignError::InvalidStack(_)));
}

#[test]
fn test_mismatched_dimensions_rejected() {
    let err = Stack::from_frames(vec![constant_frame(4, 4, 0.0), constant_frame(4, 6, 0.0)])
        .unwrap_err();
    assert!(matches!(err, StackAlignError::InvalidStack(_)));
}

#[test]
fn test_degenerate_dimensions_rejected() {
    let frame = Frame::new(Array2::zeros((0, 4)), 8);
    let err = Stack::from_frames(vec![frame]).unwrap_err();
    assert!(matches!(err, StackAlignError::InvalidStack(_)));
}

#[test]
fn test_index_error_reports_bounds() {
    let stack = Stack::from_frames(vec![constant_frame(4, 4, 0.0)]).unwrap();
    assert!(stack.get(0).is_ok());

    let err = stack.get(3).unwrap_err();
    assert!(matches!(
        err,
        StackAlignError::FrameIndexOutOfRange { index: 3, total: 1 }
    ));
}

#[test]
fn test_stack_accessors() {
    let stack = Stack::from_frames(vec![constant_frame(4, 6, 1.0), constant_frame(4, 6, 2.0)])
        .unwrap();
    assert_eq!(stack.len(), 2);
    assert!(!stack.is_empty());
    assert_eq!(stack.width(), 6);
    assert_eq!(stack.height(), 4);
    assert_eq!(stack.frames().len(), 2);
}
