//! Schnorr signing and verification through the public API.

use hex_literal::hex;
use k256_schnorr::{Error, Scalar, public_key, sign, verify};
use proptest::prelude::*;

/// Group order n
const N: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

/// n + 1
const N_PLUS_ONE: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364142");

/// Field modulus p
const P: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

/// p + 1
const P_PLUS_ONE: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC30");

const SECRET_KEY: [u8; 32] =
    hex!("B7E151628AED2A6ABF7158809CF4F3C762E7160F38B4DA56A784D9045190CFEF");

const MESSAGE: [u8; 32] =
    hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89");

fn with_r(signature: &[u8; 64], r: &[u8; 32]) -> [u8; 64] {
    let mut out = *signature;
    out[..32].copy_from_slice(r);
    out
}

fn with_s(signature: &[u8; 64], s: &[u8; 32]) -> [u8; 64] {
    let mut out = *signature;
    out[32..].copy_from_slice(s);
    out
}

#[test]
fn sign_is_deterministic() {
    let first = sign(&SECRET_KEY, &MESSAGE).unwrap();
    let second = sign(&SECRET_KEY, &MESSAGE).unwrap();
    assert_eq!(hex::encode(first), hex::encode(second));
}

#[test]
fn key_and_negated_key_share_signatures() {
    let one = hex!("0000000000000000000000000000000000000000000000000000000000000001");
    let n_minus_one = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140");
    let zero_message = [0u8; 32];

    let expected = hex!(
        "D2BCEE6A047E765467F3ED7C3E8F55EDCFA4A5FD37A9BCD064C1B5041599B187
         C3F9F2BE0665D539E38EB75989B4BC3F6DD2D9D18C5C123613615D1731E0523E"
    );
    assert_eq!(sign(&one, &zero_message).unwrap(), expected);
    assert_eq!(sign(&n_minus_one, &zero_message).unwrap(), expected);

    let even = public_key(&one).unwrap();
    let odd = public_key(&n_minus_one).unwrap();
    assert_eq!(even[0], 0x02);
    assert_eq!(odd[0], 0x03);
    assert_eq!(even[1..], odd[1..]);

    assert!(verify(&even, &zero_message, &expected).unwrap());
    assert!(verify(&odd, &zero_message, &expected).unwrap());
}

#[test]
fn invalid_private_keys() {
    for secret_key in [[0u8; 32], N, N_PLUS_ONE, [0xff; 32]] {
        assert_eq!(sign(&secret_key, &MESSAGE), Err(Error::InvalidPrivateKey));
        assert_eq!(public_key(&secret_key), Err(Error::InvalidPrivateKey));
    }
}

#[test]
fn out_of_range_signature_components() {
    let pk = public_key(&SECRET_KEY).unwrap();
    let signature = sign(&SECRET_KEY, &MESSAGE).unwrap();
    assert!(verify(&pk, &MESSAGE, &signature).unwrap());

    for r in [P, P_PLUS_ONE, [0xff; 32]] {
        assert_eq!(verify(&pk, &MESSAGE, &with_r(&signature, &r)), Ok(false));
    }

    for s in [N, N_PLUS_ONE, [0xff; 32]] {
        assert_eq!(verify(&pk, &MESSAGE, &with_s(&signature, &s)), Ok(false));
    }
}

#[test]
fn malformed_public_keys() {
    let signature = sign(&SECRET_KEY, &MESSAGE).unwrap();
    let pk = public_key(&SECRET_KEY).unwrap();

    for tag in [0x00, 0x01, 0x04, 0x05, 0x06, 0x07, 0xff] {
        let mut bad = pk;
        bad[0] = tag;
        assert_eq!(
            verify(&bad, &MESSAGE, &signature),
            Err(Error::InvalidPublicKey)
        );
    }

    // x-coordinate with no square root for x³ + 7
    let not_on_curve = hex!("02EEFDEA4CDB677750A420FEE807EACF21EB9898AE79B9768766E4FAA04A2D4A34");
    // x-coordinate not less than p
    let mut x_is_p = [0x02; 33];
    x_is_p[1..].copy_from_slice(&P);

    for bad in [not_on_curve, x_is_p, [0u8; 33], [0xff; 33]] {
        assert_eq!(
            verify(&bad, &MESSAGE, &signature),
            Err(Error::InvalidPublicKey)
        );
    }
}

#[test]
fn wrong_key_does_not_verify() {
    let signature = sign(&SECRET_KEY, &MESSAGE).unwrap();
    let other = public_key(&[0x42; 32]).unwrap();
    assert_eq!(verify(&other, &MESSAGE, &signature), Ok(false));
}

/// Public key has an odd y-coordinate
const ODD_Y_SECRET_KEY: [u8; 32] =
    hex!("F0ABABABABABABABABABABABABABABABABABABABABABABABABABABABABABABAB");

/// Asserts that flipping any single bit of the message, `r` or `s` makes
/// verification fail.
fn assert_every_bit_flip_rejected(secret_key: &[u8; 32], message: &[u8; 32]) {
    let pk = public_key(secret_key).unwrap();
    let signature = sign(secret_key, message).unwrap();
    assert_eq!(verify(&pk, message, &signature), Ok(true));

    for bit in 0..256 {
        let mut tampered = *message;
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert_eq!(
            verify(&pk, &tampered, &signature),
            Ok(false),
            "message bit {bit}"
        );
    }

    for bit in 0..512 {
        let mut tampered = signature;
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert_eq!(
            verify(&pk, message, &tampered),
            Ok(false),
            "signature bit {bit}"
        );
    }
}

#[test]
fn every_bit_flip_rejected_even_y() {
    assert_eq!(public_key(&SECRET_KEY).unwrap()[0], 0x02);
    assert_every_bit_flip_rejected(&SECRET_KEY, &MESSAGE);
}

#[test]
fn every_bit_flip_rejected_odd_y() {
    assert_eq!(
        public_key(&ODD_Y_SECRET_KEY).unwrap(),
        hex!("03D09A93E8E5B90493DDB02C25B8CF56FDD6C104541F6ECC79313A3C6C50C44784")
    );
    assert_every_bit_flip_rejected(&ODD_Y_SECRET_KEY, &MESSAGE);
}

prop_compose! {
    fn secret_key()(
        bytes in any::<[u8; 32]>().prop_filter("secret key must be in [1, n)", |bytes| {
            bool::from(Scalar::from_bytes(bytes).is_some()) && *bytes != [0u8; 32]
        })
    ) -> [u8; 32] {
        bytes
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn round_trip(d in secret_key(), message in any::<[u8; 32]>()) {
        let pk = public_key(&d).unwrap();
        let signature = sign(&d, &message).unwrap();
        prop_assert_eq!(verify(&pk, &message, &signature), Ok(true));
    }

    #[test]
    fn tamper_sensitivity(
        d in secret_key(),
        message in any::<[u8; 32]>(),
        bit in 0usize..256,
        target in 0usize..3,
    ) {
        let pk = public_key(&d).unwrap();
        let mut signature = sign(&d, &message).unwrap();
        let mut message = message;

        match target {
            0 => message[bit / 8] ^= 1 << (bit % 8),
            1 => signature[bit / 8] ^= 1 << (bit % 8),
            _ => signature[32 + bit / 8] ^= 1 << (bit % 8),
        }

        prop_assert_eq!(verify(&pk, &message, &signature), Ok(false));
    }

    #[test]
    fn high_keys_round_trip(d in secret_key()) {
        // Keys with the top bit set, covering the upper half of [1, n)
        let mut d = d;
        d[0] |= 0x80;
        prop_assume!(bool::from(Scalar::from_bytes(&d).is_some()));

        let pk = public_key(&d).unwrap();
        let signature = sign(&d, &MESSAGE).unwrap();
        prop_assert_eq!(verify(&pk, &MESSAGE, &signature), Ok(true));
    }
}
