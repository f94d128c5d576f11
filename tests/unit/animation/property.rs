use super::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn fn_property_reads_and_writes_through_closures() {
    let width = Rc::new(Cell::new(10_i64));
    let (r, w) = (width.clone(), width.clone());
    let mut prop = property(
        move || Value::Int(r.get()),
        move |v: Value| w.set(v.as_f64() as i64),
    );
    assert_eq!(prop.get(), Value::Int(10));
    prop.set(Value::Int(42));
    assert_eq!(width.get(), 42);
}

#[test]
fn keyframes_to_start_from_current_value() {
    let prop = property(|| Value::Float(0.25), |_v: Value| {});
    let kf = keyframes_to(&prop, 1.0);
    assert_eq!(kf.values, vec![0.25, 1.0]);
    assert_eq!(kf.kind, ValueKind::Float);

    let color = property(
        || Value::Argb(crate::animation::value::Argb(0xff00_0000)),
        |_v: Value| {},
    );
    assert_eq!(keyframes_to(&color, 0xffff_ffff_u32 as f64).kind, ValueKind::Argb);
}
