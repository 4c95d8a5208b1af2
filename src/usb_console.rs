//! USB CDC-ACM serial port as a [`ByteSource`].
//!
//! Three tasks run the port: one services the USB device, one copies received bytes into a
//! small queue, one tracks whether the host holds the port open. The main loop drains that queue one character per tick without ever waiting.

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::cdc_acm::{CdcAcmClass, ControlChanged, Receiver, Sender, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;

use crate::{ByteSource, Error, LinkState, Result, USB_PID, USB_VID};

const MAX_PACKET_SIZE: u16 = 64;
const INBOX_DEPTH: usize = 64;

type UsbDriver = Driver<'static, USB>;
type Inbox = Channel<CriticalSectionRawMutex, u8, INBOX_DEPTH>;

bind_interrupts!(struct UsbIrqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

static INBOX: Inbox = Channel::new();
static LINK: LinkState = LinkState::new();

/// Receive side of the USB serial port.
pub struct UsbConsole {
    inbox: &'static Inbox,
    link: &'static LinkState,
}

impl UsbConsole {
    /// Enumerates as a CDC-ACM device and spawns the tasks that service it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskSpawn`] if any of the tasks cannot be spawned.
    pub fn new(usb: Peri<'static, USB>, spawner: Spawner) -> Result<Self> {
        let driver = Driver::new(usb, UsbIrqs);

        let mut config = embassy_usb::Config::new(USB_VID, USB_PID);
        config.manufacturer = Some("Digit Matrix");
        config.product = Some("Digit Matrix Console");
        config.serial_number = Some("0001");
        config.max_power = 100;
        config.max_packet_size_0 = 64;

        let mut builder = Builder::new(
            driver,
            config,
            CONFIG_DESCRIPTOR.init([0; 256]),
            BOS_DESCRIPTOR.init([0; 256]),
            &mut [],
            CONTROL_BUF.init([0; 64]),
        );
        let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(State::new()), MAX_PACKET_SIZE);
        let device = builder.build();
        let (sender, receiver, control) = class.split_with_control();

        let token = usb_device_task(device).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        let token = usb_reader_task(receiver, &INBOX, &LINK).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        let token = usb_control_task(sender, control, &LINK).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);

        Ok(Self {
            inbox: &INBOX,
            link: &LINK,
        })
    }
}

impl ByteSource for UsbConsole {
    fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    fn try_read_char(&mut self) -> Option<char> {
        self.inbox.try_receive().ok().map(char::from)
    }
}

#[embassy_executor::task]
async fn usb_device_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

#[embassy_executor::task]
async fn usb_reader_task(
    mut receiver: Receiver<'static, UsbDriver>,
    inbox: &'static Inbox,
    link: &'static LinkState,
) -> ! {
    let mut packet = [0u8; MAX_PACKET_SIZE as usize];
    loop {
        receiver.wait_connection().await;
        link.set_enabled(true);
        #[cfg(feature = "defmt")]
        defmt::info!("serial endpoints enabled");

        loop {
            match receiver.read_packet(&mut packet).await {
                Ok(len) => {
                    for byte in packet.iter().take(len) {
                        // A full queue means the main loop is behind; drop rather than stall USB.
                        if inbox.try_send(*byte).is_err() {
                            #[cfg(feature = "defmt")]
                            defmt::warn!("serial input dropped");
                        }
                    }
                }
                Err(EndpointError::BufferOverflow) => {}
                Err(EndpointError::Disabled) => break,
            }
        }

        link.set_enabled(false);
        #[cfg(feature = "defmt")]
        defmt::info!("serial endpoints disabled");
    }
}

/// Mirrors the host's DTR line into `link`. Only the control state is read; nothing is written.
#[embassy_executor::task]
async fn usb_control_task(
    sender: Sender<'static, UsbDriver>,
    control: ControlChanged<'static>,
    link: &'static LinkState,
) -> ! {
    loop {
        let dtr = sender.dtr();
        link.set_dtr(dtr);
        #[cfg(feature = "defmt")]
        defmt::info!("serial port {}", if dtr { "opened" } else { "closed" });
        control.control_changed().await;
    }
}
