use std::io::{self, Write};

/// Any-event mouse motion reporting (1003) with SGR encoding (1006).
const ENABLE_MOTION: &[u8] = b"\x1b[?1003h\x1b[?1006h";
const DISABLE_MOTION: &[u8] = b"\x1b[?1003l";

/// Exclusive pointer input for the lifetime of one gesture.
///
/// Acquiring asks the terminal to report every pointer motion, not just
/// motion with a button held; dropping the guard turns that off again, so
/// every exit path of a gesture releases it.
pub struct PointerCapture<W: Write> {
    out: W,
}

impl<W: Write> PointerCapture<W> {
    /// Start capturing pointer motion.
    ///
    /// # Errors
    /// Returns an error if the escape sequence cannot be written.
    pub fn acquire(mut out: W) -> io::Result<Self> {
        out.write_all(ENABLE_MOTION)?;
        out.flush()?;
        Ok(Self { out })
    }
}

impl<W: Write> Drop for PointerCapture<W> {
    fn drop(&mut self) {
        let _ = self.out.write_all(DISABLE_MOTION);
        let _ = self.out.flush();
    }
}

/// Drop any-event motion reporting while keeping button-event tracking.
///
/// # Errors
/// Returns an error if the escape sequence cannot be written.
pub fn release_motion_tracking(out: &mut impl Write) -> io::Result<()> {
    out.write_all(DISABLE_MOTION)?;
    out.flush()
}
