use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt as _, registry::Registry};

static INIT: Once = Once::new();

pub(crate) fn init() {
	INIT.call_once(|| {
		let layer = tracing_tree::HierarchicalLayer::default()
			.with_writer(tracing_subscriber::fmt::TestWriter::new())
			.with_indent_lines(true)
			.with_indent_amount(2)
			.with_targets(true);

		let sub = Registry::default().with(layer);
		tracing::subscriber::set_global_default(sub).unwrap();
	});
}

/// Flip a single bit of `bytes`, counting bits from the start of the slice.
pub(crate) fn flip_bit(bytes: &mut [u8], bit: usize) {
	bytes[bit / 8] ^= 1 << (bit % 8);
}

/// A randomness source that has nothing to give.
pub(crate) struct BrokenRng;

#[derive(Debug)]
pub(crate) struct OutOfEntropy;

impl std::fmt::Display for OutOfEntropy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("out of entropy")
	}
}

impl std::error::Error for OutOfEntropy {}

impl rand::TryRngCore for BrokenRng {
	type Error = OutOfEntropy;

	fn try_next_u32(&mut self) -> Result<u32, OutOfEntropy> {
		Err(OutOfEntropy)
	}

	fn try_next_u64(&mut self) -> Result<u64, OutOfEntropy> {
		Err(OutOfEntropy)
	}

	fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), OutOfEntropy> {
		Err(OutOfEntropy)
	}
}
