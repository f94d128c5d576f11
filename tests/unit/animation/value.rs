use super::*;

#[test]
fn float_keyframes_interpolate_between_neighbours() {
    let kf = Keyframes::floats(vec![0.0, 100.0, 50.0]);
    assert_eq!(kf.sample(0.0), Value::Float(0.0));
    assert_eq!(kf.sample(0.25), Value::Float(50.0));
    assert_eq!(kf.sample(0.5), Value::Float(100.0));
    assert_eq!(kf.sample(1.0), Value::Float(50.0));
}

#[test]
fn sample_clamps_progress() {
    let kf = Keyframes::floats(vec![1.0, 2.0]);
    assert_eq!(kf.sample(-0.5), Value::Float(1.0));
    assert_eq!(kf.sample(3.0), Value::Float(2.0));
}

#[test]
fn single_keyframe_is_constant() {
    let kf = Keyframes::floats(vec![7.0]);
    assert_eq!(kf.sample(0.3), Value::Float(7.0));
}

#[test]
fn int_keyframes_round() {
    let kf = Keyframes::ints(&[0, 3]);
    assert_eq!(kf.sample(0.5), Value::Int(2));
    assert_eq!(kf.sample(0.1), Value::Int(0));
}

#[test]
fn argb_keyframes_lerp_per_channel() {
    let kf = Keyframes::argb(&[0xff00_0000, 0xffff_ffff]);
    assert_eq!(kf.sample(0.5), Value::Argb(Argb(0xff80_8080)));
    assert_eq!(kf.sample(1.0), Value::Argb(Argb(0xffff_ffff)));
}

#[test]
fn validate_rejects_bad_keyframes() {
    assert!(Keyframes::floats(Vec::<f64>::new()).validate().is_err());
    assert!(Keyframes::floats(vec![f64::NAN]).validate().is_err());
    let bad_color = Keyframes {
        values: vec![-1.0],
        kind: ValueKind::Argb,
    };
    assert!(bad_color.validate().is_err());
    assert!(Keyframes::argb(&[0x1234_5678]).validate().is_ok());
}

#[test]
fn value_numeric_view() {
    assert_eq!(Value::Int(4).as_f64(), 4.0);
    assert_eq!(Value::Argb(Argb(255)).as_f64(), 255.0);
}
