//! Port I/O access.
//!
//! All MCA setup traffic is byte-wide port I/O. The scanner talks to the
//! hardware through [`PortIo`] so the same code drives real ports and the
//! emulated bus used by the tests.
//!
//! # Safety
//! Only [`HardwarePorts::new`] is unsafe: constructing it asserts that the
//! caller runs with I/O privilege (ring 0 / IOPL 3), as is the case for
//! firmware after ExitBootServices.

/// Port written to for the legacy I/O delay after a "pausing" access.
pub const IO_DELAY_PORT: u16 = 0x80;

/// Byte-granular port I/O.
pub trait PortIo {
    /// Read 8-bit value from I/O port.
    fn inb(&mut self, port: u16) -> u8;

    /// Write 8-bit value to I/O port.
    fn outb(&mut self, port: u16, value: u8);

    /// Short bus delay between back-to-back accesses to slow ISA/MCA logic.
    #[inline]
    fn io_delay(&mut self) {
        self.outb(IO_DELAY_PORT, 0);
    }

    /// Read followed by an I/O delay.
    #[inline]
    fn inb_p(&mut self, port: u16) -> u8 {
        let value = self.inb(port);
        self.io_delay();
        value
    }

    /// Write followed by an I/O delay.
    #[inline]
    fn outb_p(&mut self, port: u16, value: u8) {
        self.outb(port, value);
        self.io_delay();
    }
}

impl<P: PortIo + ?Sized> PortIo for &mut P {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        (**self).inb(port)
    }

    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        (**self).outb(port, value)
    }

    #[inline]
    fn io_delay(&mut self) {
        (**self).io_delay()
    }

    #[inline]
    fn inb_p(&mut self, port: u16) -> u8 {
        (**self).inb_p(port)
    }

    #[inline]
    fn outb_p(&mut self, port: u16, value: u8) {
        (**self).outb_p(port, value)
    }
}

/// Direct `in`/`out` instruction access to the x86 I/O space.
#[derive(Debug)]
pub struct HardwarePorts {
    _private: (),
}

impl HardwarePorts {
    /// Create a handle to the machine's I/O ports.
    ///
    /// # Safety
    /// Caller must have I/O port access privileges, and no other agent may
    /// be driving the MCA setup registers concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl PortIo for HardwarePorts {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        let value: u8;
        // SAFETY: I/O privilege is a construction invariant of HardwarePorts.
        unsafe {
            core::arch::asm!(
                "in al, dx",
                in("dx") port,
                out("al") value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }

    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        // SAFETY: I/O privilege is a construction invariant of HardwarePorts.
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nomem, nostack, preserves_flags)
            );
        }
    }
}

// Stubs for non-x86_64
#[cfg(not(target_arch = "x86_64"))]
impl PortIo for HardwarePorts {
    #[inline]
    fn inb(&mut self, _port: u16) -> u8 {
        0
    }

    #[inline]
    fn outb(&mut self, _port: u16, _value: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct Trace {
        ops: Vec<(char, u16, u8)>,
    }

    impl PortIo for Trace {
        fn inb(&mut self, port: u16) -> u8 {
            self.ops.push(('r', port, 0));
            0x5a
        }

        fn outb(&mut self, port: u16, value: u8) {
            self.ops.push(('w', port, value));
        }
    }

    #[test]
    fn test_pausing_write_adds_delay() {
        let mut io = Trace::default();
        io.outb_p(0x96, 0x0b);
        assert_eq!(io.ops, [('w', 0x96, 0x0b), ('w', IO_DELAY_PORT, 0)]);
    }

    #[test]
    fn test_pausing_read_returns_value_then_delays() {
        let mut io = Trace::default();
        assert_eq!(io.inb_p(0x100), 0x5a);
        assert_eq!(io.ops, [('r', 0x100, 0), ('w', IO_DELAY_PORT, 0)]);
    }

    /// Port set with its own delay strategy.
    #[derive(Default)]
    struct SlowBus {
        inner: Trace,
        delays: usize,
    }

    impl PortIo for SlowBus {
        fn inb(&mut self, port: u16) -> u8 {
            self.inner.inb(port)
        }

        fn outb(&mut self, port: u16, value: u8) {
            self.inner.outb(port, value)
        }

        fn io_delay(&mut self) {
            self.delays += 1;
        }
    }

    #[test]
    fn test_mut_ref_keeps_delay_override() {
        fn setup<P: PortIo>(mut io: P) {
            io.outb_p(0x96, 0x08);
            io.inb_p(0x100);
        }

        let mut io = SlowBus::default();
        setup(&mut io);
        assert_eq!(io.delays, 2);
        assert_eq!(io.inner.ops, [('w', 0x96, 0x08), ('r', 0x100, 0)]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn poke<P: PortIo>(mut io: P) {
            io.outb(0x94, 0xff);
        }

        let mut io = Trace::default();
        poke(&mut io);
        assert_eq!(io.ops, [('w', 0x94, 0xff)]);
    }
}
