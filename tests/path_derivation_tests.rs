use ants_pipeline::*;

fn volume_params(path: &str) -> RegistrationParams {
    RegistrationParams::structured(Vec::new()).with_output_volume(path)
}

#[test]
fn nii_gz_volume_derives_by_suffix_trim() {
    let strategy = DerivationStrategy::for_output("foo.nii.gz").unwrap();
    assert_eq!(strategy, DerivationStrategy::SuffixTrim { extension_len: 7 });

    let paths = DerivedPaths::from_params(&volume_params("foo.nii.gz")).unwrap();
    assert_eq!(paths.composite_transform, "fooComposite.h5");
    assert_eq!(paths.output_base, "foo");
}

#[test]
fn nii_volume_derives_by_suffix_trim() {
    let strategy = DerivationStrategy::for_output("scan.nii").unwrap();
    assert_eq!(strategy, DerivationStrategy::SuffixTrim { extension_len: 4 });

    let paths = DerivedPaths::from_params(&volume_params("scan.nii")).unwrap();
    assert_eq!(paths.composite_transform, "scanComposite.h5");
    assert_eq!(paths.output_base, "scan");
}

#[test]
fn nrrd_volume_derives_by_token_substitution() {
    let strategy = DerivationStrategy::for_output("foo.nrrd").unwrap();
    assert_eq!(
        strategy,
        DerivationStrategy::TokenSubstitution { token: ".nrrd" }
    );

    let paths = DerivedPaths::from_params(&volume_params("foo.nrrd")).unwrap();
    assert_eq!(paths.composite_transform, "fooComposite.h5");
    assert_eq!(paths.output_base, "foo");
}

#[test]
fn displacement_field_alone_drives_derivation() {
    let params =
        RegistrationParams::structured(Vec::new()).with_output_displacement_field("field.nii.gz");
    let paths = DerivedPaths::from_params(&params).unwrap();
    assert_eq!(paths.composite_transform, "fieldComposite.h5");
    assert_eq!(paths.output_base, "field");
    assert_eq!(paths.reference_volume, None);
}

#[test]
fn explicit_composite_path_is_used_verbatim() {
    let params = RegistrationParams::structured(Vec::new())
        .with_output_composite_transform("transforms/subjectComposite.h5");
    let paths = DerivedPaths::from_params(&params).unwrap();
    assert_eq!(paths.composite_transform, "transforms/subjectComposite.h5");
    assert_eq!(paths.output_base, "transforms/subject");
}

#[test]
fn volume_takes_priority_over_displacement_field() {
    let params = volume_params("aligned.nii.gz").with_output_displacement_field("field.nii.gz");
    let paths = DerivedPaths::from_params(&params).unwrap();
    assert_eq!(paths.composite_transform, "alignedComposite.h5");
    assert_eq!(paths.output_base, "aligned");
}

#[test]
fn composite_path_is_never_empty_for_valid_variants() {
    let variants = vec![
        volume_params("foo.nii.gz"),
        volume_params("foo.nrrd"),
        RegistrationParams::structured(Vec::new()).with_output_displacement_field("field.nii.gz"),
        RegistrationParams::structured(Vec::new()).with_output_composite_transform("xfComposite.h5"),
        volume_params("foo.nii.gz").with_output_displacement_field("field.nii.gz"),
    ];
    for params in variants {
        let paths = DerivedPaths::from_params(&params).unwrap();
        assert!(!paths.composite_transform.is_empty());
        assert_eq!(
            paths.output_base,
            paths.composite_transform.replace("Composite.h5", "")
        );
    }
}

#[test]
fn unrecognized_extension_is_rejected() {
    let err = DerivedPaths::from_params(&volume_params("foo.txt")).unwrap_err();
    assert_eq!(
        err,
        ParameterError::UnrecognizedExtension("foo.txt".to_string())
    );
}

#[test]
fn inverse_composite_sits_next_to_the_base() {
    let paths = DerivedPaths::from_params(&volume_params("out/subject.nii.gz")).unwrap();
    assert_eq!(paths.inverse_composite(), "out/subjectInverseComposite.h5");
}

#[test]
fn output_volume_resolves_the_reference() {
    let paths = DerivedPaths::from_params(&volume_params("aligned.nii.gz")).unwrap();
    assert_eq!(paths.reference_volume.as_deref(), Some("aligned.nii.gz"));
}

#[test]
fn explicit_reference_wins_over_output_volume() {
    let params = volume_params("aligned.nii.gz").with_reference_volume("fixed.nii.gz");
    let paths = DerivedPaths::from_params(&params).unwrap();
    assert_eq!(paths.reference_volume.as_deref(), Some("fixed.nii.gz"));
}
