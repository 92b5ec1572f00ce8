#![cfg(feature = "derive")]

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/*.rs");
    // definition-time errors: InvalidKey, missing target, ShapeMismatch
    t.compile_fail("tests/ui/fail/*.rs");
}
