#![no_main]
// Decoding and verification must never panic on adversarial input.
use k256_schnorr::{Error, verify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 33 + 32 + 64 {
        return;
    }

    let mut public_key = [0u8; 33];
    let mut message = [0u8; 32];
    let mut signature = [0u8; 64];
    public_key.copy_from_slice(&data[..33]);
    message.copy_from_slice(&data[33..65]);
    signature.copy_from_slice(&data[65..129]);

    match verify(&public_key, &message, &signature) {
        Ok(_) => assert!(matches!(public_key[0], 0x02 | 0x03)),
        Err(err) => assert_eq!(err, Error::InvalidPublicKey),
    }

    // Flipping the parity tag never changes the outcome
    if matches!(public_key[0], 0x02 | 0x03) {
        let mut flipped = public_key;
        flipped[0] ^= 1;
        assert_eq!(
            verify(&public_key, &message, &signature),
            verify(&flipped, &message, &signature)
        );
    }
});
