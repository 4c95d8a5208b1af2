//! [`WireChannel`] on an RP2040 PIO state machine generating WS2812 bit timing.

use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::program::{Assembler, JmpCondition, OutDestination, SetDestination, SideSet};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::Peri;
use embassy_time::Timer;
use fixed::types::U24F8;
use static_cell::StaticCell;

use crate::WireChannel;

// Each bit is T1 + T2 + T3 PIO cycles: always high for T1, high (one) or low (zero) for T2,
// always low for T3.
const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

bind_interrupts!(pub struct Pio0Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Dropping `Common` would release the PIO block, so it lives for the rest of the program.
static PIO0_COMMON: StaticCell<Common<'static, PIO0>> = StaticCell::new();

fn load_program<'d, PIO: Instance>(common: &mut Common<'d, PIO>) -> LoadedProgram<'d, PIO> {
    let side_set = SideSet::new(false, 1, false);
    let mut assembler: Assembler<32> = Assembler::new_with_side_set(side_set);

    let mut wrap_target = assembler.label();
    let mut wrap_source = assembler.label();
    let mut do_zero = assembler.label();
    assembler.set_with_side_set(SetDestination::PINDIRS, 1, 0);
    assembler.bind(&mut wrap_target);
    assembler.out_with_delay_and_side_set(OutDestination::X, 1, T3 - 1, 0);
    assembler.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
    assembler.jmp_with_delay_and_side_set(JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
    assembler.bind(&mut do_zero);
    assembler.nop_with_delay_and_side_set(T2 - 1, 0);
    assembler.bind(&mut wrap_source);

    let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
    common.load_program(&program)
}

/// One PIO state machine fed a byte at a time by the CPU.
///
/// The state machine is left disabled until [`WireChannel::configure`] sets the bit rate.
pub struct PioWireChannel<'d, PIO: Instance, const S: usize> {
    sm: StateMachine<'d, PIO, S>,
    config: Config<'d, PIO>,
    // Time for one byte to leave the output shift register, rounded up.
    byte_time_us: u64,
}

impl<'d, PIO: Instance, const S: usize> PioWireChannel<'d, PIO, S> {
    /// Loads the WS2812 program and routes it to `pin`.
    pub fn new(
        common: &mut Common<'d, PIO>,
        sm: StateMachine<'d, PIO, S>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = load_program(common);
        let out_pin = common.make_pio_pin(pin);

        let mut config = Config::default();
        config.set_out_pins(&[&out_pin]);
        config.set_set_pins(&[&out_pin]);
        config.use_program(&program, &[&out_pin]);
        config.fifo_join = FifoJoin::TxOnly;
        // One byte per FIFO word, taken from the top bits so the MSB leaves first.
        config.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 8,
            direction: ShiftDirection::Left,
        };

        Self {
            sm,
            config,
            byte_time_us: 0,
        }
    }
}

impl<PIO: Instance, const S: usize> WireChannel for PioWireChannel<'_, PIO, S> {
    fn configure(&mut self, bit_rate_hz: u32) {
        let clock_khz = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_khz = U24F8::from_num(bit_rate_hz / 1000);
        self.config.clock_divider = clock_khz / (bit_khz * CYCLES_PER_BIT);
        self.byte_time_us = u64::from(8 * 1_000_000_u32.div_ceil(bit_rate_hz.max(1)));

        self.sm.set_enable(false);
        self.sm.set_config(&self.config);
        self.sm.set_enable(true);
    }

    async fn send_byte(&mut self, byte: u8) {
        self.sm.tx().wait_push(u32::from(byte) << 24).await;
    }

    async fn flush(&mut self) {
        while !self.sm.tx().empty() {
            Timer::after_micros(self.byte_time_us).await;
        }
        // The FIFO is empty, but the last byte may still be in the shift register.
        Timer::after_micros(self.byte_time_us).await;
    }
}

/// Claims PIO0 with its interrupt bound and returns a channel on state machine 0 driving `pin`.
pub fn init_pio0(
    pio: Peri<'static, PIO0>,
    pin: Peri<'static, impl PioPin>,
) -> PioWireChannel<'static, PIO0, 0> {
    let Pio { common, sm0, .. } = Pio::new(pio, Pio0Irqs);
    let common = PIO0_COMMON.init(common);
    PioWireChannel::new(common, sm0, pin)
}
