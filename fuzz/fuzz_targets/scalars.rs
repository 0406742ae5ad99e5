#![no_main]
use k256_schnorr::{FieldElement, Scalar};
use libfuzzer_sys::fuzz_target;

macro_rules! test_field {
    ($field:ty, $fe1:expr, $fe2:expr, $fe3:expr) => {{
        let (fe1, fe2, fe3): ($field, $field, $field) = ($fe1, $fe2, $fe3);

        // Associativity
        assert_eq!(fe1 + (fe2 + fe3), (fe1 + fe2) + fe3);
        assert_eq!(fe1 * (fe2 * fe3), (fe1 * fe2) * fe3);

        // Commutativity
        assert_eq!(fe1 + fe2, fe2 + fe1);
        assert_eq!(fe1 * fe2, fe2 * fe1);

        // Identity
        assert_eq!(fe1 + <$field>::ZERO, fe1);
        assert_eq!(fe1 * <$field>::ONE, fe1);
        assert_eq!(fe1 - fe1, <$field>::ZERO);

        // Distributivity
        assert_eq!(fe1 * (fe2 + fe3), fe1 * fe2 + fe1 * fe3);

        // Inverse, square
        assert_eq!(fe1 + (-fe1), <$field>::ZERO);
        if !bool::from(fe1.is_zero()) {
            assert_eq!(fe1.square() * fe1.invert().unwrap(), fe1);
        }

        // Serialization
        assert_eq!(<$field>::from_bytes(&fe1.to_bytes()).unwrap(), fe1);
    }};
}

fn chunk(data: &[u8], i: usize) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[i * 32..(i + 1) * 32]);
    bytes
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let (a, b, c) = (chunk(data, 0), chunk(data, 1), chunk(data, 2));

    test_field!(
        Scalar,
        Scalar::reduce_bytes(&a),
        Scalar::reduce_bytes(&b),
        Scalar::reduce_bytes(&c)
    );

    // Out-of-range field encodings fall back to one
    let fe = |bytes: &[u8; 32]| FieldElement::from_bytes(bytes).unwrap_or(FieldElement::ONE);
    test_field!(FieldElement, fe(&a), fe(&b), fe(&c));

    if let Some(root) = Option::<FieldElement>::from(fe(&a).sqrt()) {
        assert_eq!(root.square(), fe(&a));
    }
});
