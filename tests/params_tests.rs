use ants_pipeline::*;

#[test]
fn register_requires_an_output_target() {
    let params = RegistrationParams::structured(Vec::new());
    assert_eq!(params.validate(), Err(ParameterError::NoOutputRequested));
}

#[test]
fn register_classifies_single_output_variants() {
    let volume = RegistrationParams::structured(Vec::new()).with_output_volume("foo.nii.gz");
    assert_eq!(volume.output_spec(), Ok(OutputSpec::Volume));

    let composite =
        RegistrationParams::structured(Vec::new()).with_output_composite_transform("xfComposite.h5");
    assert_eq!(composite.output_spec(), Ok(OutputSpec::CompositeTransform));

    let field =
        RegistrationParams::structured(Vec::new()).with_output_displacement_field("field.nii.gz");
    assert_eq!(field.output_spec(), Ok(OutputSpec::DisplacementField));
}

#[test]
fn register_classifies_combined_output_variants() {
    let params = RegistrationParams::structured(Vec::new())
        .with_output_volume("foo.nii.gz")
        .with_output_displacement_field("field.nii.gz");
    assert_eq!(params.output_spec(), Ok(OutputSpec::VolumeAndDisplacement));
    assert!(params.validate().is_ok());

    let params = RegistrationParams::template("--transform Rigid[0.1]")
        .with_output_composite_transform("xfComposite.h5")
        .with_output_displacement_field("field.nii.gz");
    assert_eq!(params.output_spec(), Ok(OutputSpec::CompositeAndDisplacement));
    assert!(params.validate().is_ok());
}

#[test]
fn register_rejects_volume_together_with_composite() {
    let params = RegistrationParams::structured(Vec::new())
        .with_output_volume("foo.nii.gz")
        .with_output_composite_transform("xfComposite.h5");
    assert_eq!(
        params.validate(),
        Err(ParameterError::ExclusiveVolumeAndTransform)
    );
}

#[test]
fn structured_register_rejects_composite_together_with_displacement() {
    let params = RegistrationParams::structured(Vec::new())
        .with_output_composite_transform("xfComposite.h5")
        .with_output_displacement_field("field.nii.gz");
    assert_eq!(
        params.validate(),
        Err(ParameterError::ExclusiveTransformTargets)
    );
}

#[test]
fn register_bounds_the_input_volume_family() {
    let mut params =
        RegistrationParams::template("--metric MI[$inputVolume01,$inputVolume02,1,32]")
            .with_output_volume("foo.nii.gz");
    for index in 0..12 {
        params = params.with_input_volume(format!("volume{:02}.nii.gz", index));
    }
    assert_eq!(
        params.validate(),
        Err(ParameterError::TooManyInputVolumes { max: 11, got: 12 })
    );
}

#[test]
fn empty_strings_count_as_absent_parameters() {
    let params = RegistrationParams::structured(Vec::new())
        .with_output_volume("")
        .with_output_composite_transform("")
        .with_output_displacement_field("");
    assert_eq!(params.validate(), Err(ParameterError::NoOutputRequested));
}

#[test]
fn apply_requires_a_reference_volume() {
    let params = ApplyTransformsParams::new()
        .with_transform("xf.h5")
        .with_output_volume("out.nii.gz");
    assert_eq!(params.validate(), Err(ParameterError::MissingReferenceVolume));
}

#[test]
fn apply_requires_a_transform() {
    let params = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_output_volume("out.nii.gz");
    assert_eq!(params.validate(), Err(ParameterError::MissingTransform));
}

#[test]
fn apply_rejects_both_transform_inputs() {
    let params = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_transform("xf-node.h5")
        .with_transform_file("xf-file.h5")
        .with_output_volume("out.nii.gz");
    assert_eq!(params.validate(), Err(ParameterError::AmbiguousTransform));
}

#[test]
fn apply_rejects_volume_together_with_displacement_field() {
    let params = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_transform("xf.h5")
        .with_output_volume("out.nii.gz")
        .with_output_displacement_field("field.nii.gz");
    assert_eq!(
        params.validate(),
        Err(ParameterError::ExclusiveVolumeAndTransform)
    );
}

#[test]
fn apply_requires_an_output_target() {
    let params = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_transform("xf.h5");
    assert_eq!(params.validate(), Err(ParameterError::NoOutputRequested));
}

#[test]
fn apply_accepts_either_transform_input() {
    let node = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_transform("xf.h5")
        .with_output_displacement_field("field.nii.gz");
    assert!(node.validate().is_ok());
    assert_eq!(node.transform_path(), Some("xf.h5"));

    let file = ApplyTransformsParams::new()
        .with_reference_volume("ref.nii.gz")
        .with_transform_file("xf-file.h5")
        .with_output_volume("out.nii.gz");
    assert!(file.validate().is_ok());
    assert_eq!(file.transform_path(), Some("xf-file.h5"));
}
