#![no_std]
#![no_main]

use defmt::{debug, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Config as UartConfig, DataBits, Parity, StopBits, Uart};
use embassy_sync::channel::Channel;
use rfid_reader::{
    ChannelReceiver, EventChannel, ReadOutcome, ReaderBridge, ReaderConfig, RfidReader,
    TransportError, UartByteSource, UartReaderBridge, ENABLE_PIN, PICO, READER_PORT, RFID_BAUDRATE,
};
use static_cell::StaticCell;

#[cfg(feature = "frame-timeout")]
use embassy_time::with_timeout;
#[cfg(feature = "frame-timeout")]
use rfid_reader::FRAME_TIMEOUT;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Read events from the reader task to the event task.
static EVENTS: StaticCell<EventChannel> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RFID reader starting...");

    // Validate wiring before any peripheral is opened
    let config = match ReaderConfig::validate(&PICO, Some(READER_PORT), ENABLE_PIN) {
        Ok(config) => config,
        Err(e) => defmt::panic!("Invalid reader configuration: {}", e),
    };
    info!(
        "Reader on {} with enable {}, {} pins left free",
        config.port(),
        config.enable_pin(),
        config.available_pins().len()
    );

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let events: &'static EventChannel = EVENTS.init(Channel::new());

    // --- UART Setup (2400 8N1) ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = RFID_BAUDRATE;
    uart_config.data_bits = DataBits::DataBits8;
    uart_config.stop_bits = StopBits::STOP1;
    uart_config.parity = Parity::ParityNone;

    let uart = Uart::new(
        p.UART1, // READER_PORT
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (_tx, rx) = uart.split();

    // --- Reader Setup ---
    // Starts deasserted; power the module once the UART is listening
    let enable = Output::new(p.PIN_6, Level::High); // ENABLE_PIN
    let mut reader = RfidReader::new(config, enable, ChannelReceiver::new(events));
    reader.set_enabled(true);

    let bridge = ReaderBridge::new(UartByteSource::new(rx), reader);

    // On-board LED for read indication
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(reader_task(bridge).unwrap());
    spawner.spawn(event_task(events, led).unwrap());

    info!("RFID reader initialized, waiting for tags...");
}

/// Reader task - feeds UART bytes through the frame parser.
#[embassy_executor::task]
async fn reader_task(mut bridge: UartReaderBridge<'static>) {
    let mut last = bridge.reader().stats();
    loop {
        if let Err(e) = next_byte(&mut bridge).await {
            warn!("UART error: {:?}", e);
        }

        // Report once per completed frame, not per noise byte
        let stats = bridge.reader().stats();
        if (stats.tags_read, stats.reads_failed) != (last.tags_read, last.reads_failed) {
            debug!(
                "{:?}, {} events dropped",
                stats,
                bridge.reader().receiver().dropped()
            );
            last = stats;
        }
    }
}

#[cfg(not(feature = "frame-timeout"))]
async fn next_byte(bridge: &mut UartReaderBridge<'static>) -> Result<(), TransportError> {
    bridge.process_one().await
}

/// Like the plain read, but gives up on a frame whose next byte is late.
#[cfg(feature = "frame-timeout")]
async fn next_byte(bridge: &mut UartReaderBridge<'static>) -> Result<(), TransportError> {
    if !bridge.reader().is_frame_in_progress() {
        return bridge.process_one().await;
    }

    match with_timeout(FRAME_TIMEOUT, bridge.process_one()).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Frame timed out in {:?}", bridge.reader().state());
            bridge.reader_mut().abort_frame();
            Ok(())
        }
    }
}

/// Event task - logs read events and toggles the LED.
#[embassy_executor::task]
async fn event_task(events: &'static EventChannel, mut led: Output<'static>) {
    loop {
        match events.receive().await {
            ReadOutcome::Success(tag) => match tag.as_str() {
                Some(id) => info!("Tag read: {=str}", id),
                None => info!("Tag read: {:X}", tag.as_bytes()),
            },
            ReadOutcome::Failure => warn!("Read failed"),
        }
        led.toggle();
    }
}
