//! Test suite for the shared ownership of the modality transform
//! across monochrome pixel representations.

use std::sync::{Arc, Barrier};
use std::thread;

use dicom_pixelrep::{
    Error, InputPixel, ModalityTransform, MonoOutputPixel, MonoPixel, PixelRepresentation,
    Rescale, SharedModality,
};
use rstest::rstest;

fn ct_modality() -> SharedModality {
    ModalityTransform::new(Rescale::new(1., -1024.)).shared()
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(32)]
fn dropping_siblings_restores_count(#[case] n: usize) {
    let modality = ct_modality();
    let mono = MonoPixel::from_input(Some(&InputPixel::new(1000)), Some(Arc::clone(&modality)));
    let before = ModalityTransform::reference_count(&modality);

    let siblings: Vec<_> = (0..n).map(|i| mono.reframe(i * 10)).collect();
    assert_eq!(ModalityTransform::reference_count(&modality), before + n);
    for (i, sibling) in siblings.iter().enumerate() {
        assert_eq!(sibling.sample_count(), i * 10);
    }

    drop(siblings);
    assert_eq!(ModalityTransform::reference_count(&modality), before);
}

/// Siblings created from other siblings
/// all hold the very same transform.
#[test]
fn chained_reframing() {
    let modality = ct_modality();
    let weak = Arc::downgrade(&modality);

    let first = MonoPixel::from_input(Some(&InputPixel::new(64)), Some(modality));
    let second = first.reframe(32);
    let third = second.reframe(16);
    assert_eq!(ModalityTransform::reference_count(first.modality().unwrap()), 3);
    assert!(Arc::ptr_eq(
        first.modality().unwrap(),
        third.modality().unwrap()
    ));

    drop(first);
    drop(second);
    assert!(weak.upgrade().is_some());
    assert_eq!(ModalityTransform::reference_count(third.modality().unwrap()), 1);

    // last holder gone, transform released
    drop(third);
    assert!(weak.upgrade().is_none());
}

#[test]
fn concurrent_siblings_release_once() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let modality = ct_modality();
    let weak = Arc::downgrade(&modality);
    let mono = Arc::new(MonoPixel::from_input(
        Some(&InputPixel::new(4096)),
        Some(modality),
    ));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let mono = Arc::clone(&mono);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..ROUNDS {
                    let frame = mono.reframe(i);
                    assert!(frame.has_modality());
                    let output = MonoOutputPixel::new(Some(&frame), 1).unwrap();
                    assert_eq!(output.sample_count(), i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mono = Arc::try_unwrap(mono).unwrap();
    assert_eq!(ModalityTransform::reference_count(mono.modality().unwrap()), 1);
    drop(mono);
    assert!(weak.upgrade().is_none());
}

#[test]
fn output_of_reframed_pixel() {
    let input = InputPixel::from_geometry(10, 10, 1, 4).unwrap();
    let mono = MonoPixel::from_input(Some(&input), Some(ct_modality()));
    let output = MonoOutputPixel::new(Some(&mono), 4).unwrap();
    assert_eq!(output.sample_count(), 100);

    // first two frames only
    let pair = mono.reframe(2 * output.sample_count());
    let output = MonoOutputPixel::new(Some(&pair), 2).unwrap();
    assert_eq!(output.sample_count(), 100);
    assert_eq!(output.frame_range(1).unwrap(), 100..200);

    assert!(matches!(
        MonoOutputPixel::new(Some(&pair), 0),
        Err(Error::InvalidArgument { .. })
    ));
}
