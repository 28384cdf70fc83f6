mod codec;

pub(crate) const ISSUED_AT: i64 = 1_700_000_000_000;
pub(crate) const TEST_SECRET: &[u8] = b"test-qr-signing-secret-32-bytes!";
