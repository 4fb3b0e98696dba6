//! Non-deterministic source of uniformly distributed 32-bit words.

#[cfg(target_arch = "x86")]
use std::arch::x86 as arch;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64 as arch;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

enum Backend {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Rdrand,
    Os(OsRng),
    #[cfg(test)]
    Exhausted,
}

/// Uniform random bits straight from the CPU's `RDRAND` instruction.
///
/// There is no seeding API and no internal state apart from the choice of backend, so two
/// instances never produce correlated streams. Targets without `RDRAND` fall back to the
/// operating system's entropy source. The type is not `Clone`: each worker constructs its own.
///
/// Through [`RngCore`] a failed draw yields zero bits and is remembered until
/// [`RandomSource::check`] reports it.
pub struct RandomSource {
    backend: Backend,
    failure: Option<Error>,
}

impl RandomSource {
    /// How many times a failed `RDRAND` is re-issued before the source is declared broken.
    pub const RETRY_LIMIT: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if std::is_x86_feature_detected!("rdrand") {
            return Self::with_backend(Backend::Rdrand);
        }
        Self::with_backend(Backend::Os(OsRng))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            failure: None,
        }
    }

    /// A source whose every draw fails.
    #[cfg(test)]
    pub(crate) fn exhausted() -> Self {
        Self::with_backend(Backend::Exhausted)
    }

    /// Draw one word, or report that the hardware kept signalling failure.
    pub fn try_next_u32(&mut self) -> Result<u32> {
        match &mut self.backend {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Rdrand => (0..Self::RETRY_LIMIT)
                // SAFETY: the backend is only selected after `rdrand` was detected at runtime.
                .find_map(|_| unsafe { rdrand32() })
                .ok_or_else(|| {
                    Error::RandomSource(format!(
                        "RDRAND failed {} consecutive times",
                        Self::RETRY_LIMIT
                    ))
                }),
            Backend::Os(rng) => {
                let mut bytes = [0; 4];
                rng.try_fill_bytes(&mut bytes)
                    .map_err(|err| Error::RandomSource(err.to_string()))?;
                Ok(u32::from_ne_bytes(bytes))
            }
            #[cfg(test)]
            Backend::Exhausted => Err(Error::RandomSource("entropy exhausted".to_owned())),
        }
    }

    /// Fails with the first error hit by a draw made through [`RngCore`] since the last check.
    pub fn check(&mut self) -> Result<()> {
        self.failure.take().map_or(Ok(()), Err)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand32() -> Option<u32> {
    let mut value = 0;
    (arch::_rdrand32_step(&mut value) == 1).then_some(value)
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.try_next_u32().unwrap_or_else(|err| {
            self.failure.get_or_insert(err);
            0
        })
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            chunk.copy_from_slice(&self.next_u32().to_ne_bytes()[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        for chunk in dest.chunks_mut(4) {
            let word = self.try_next_u32().map_err(rand::Error::new)?;
            chunk.copy_from_slice(&word.to_ne_bytes()[..chunk.len()]);
        }
        Ok(())
    }
}
