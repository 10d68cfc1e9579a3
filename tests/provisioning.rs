//! End-to-end bring-up through the public API (requires the `mock` feature)

use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use wifly_link::devices::wifly::{
    SerialBridge, StateTable, StepOutcome, WiflyContext, WiflyDriver, WiflyError, WiflyState,
};
use wifly_link::parameters::{WifiCredentials, WiflyTimings};
use wifly_link::platform::mock::{MockDelay, MockResetPin, MockUart, MockWiflyModule};
use wifly_link::platform::traits::ByteTransport;

type Hook<'a> = Box<dyn FnMut(u64) + 'a>;

fn credentials() -> WifiCredentials {
    WifiCredentials::new("office$net", "s3cret-pass").unwrap()
}

fn pumped_delay<'a>(
    ctx: &'a WiflyContext<NoopRawMutex>,
    module: &'a RefCell<MockWiflyModule>,
) -> MockDelay<Hook<'a>> {
    MockDelay::with_hook(Box::new(move |_now_ms: u64| {
        ctx.pump_step(&mut *module.borrow_mut());
    }) as Hook<'a>)
}

#[tokio::test]
async fn test_bring_up_then_exchange_data() {
    let ctx = WiflyContext::<NoopRawMutex>::new();
    let table = StateTable::new(&credentials()).unwrap();
    let module = RefCell::new(MockWiflyModule::from_table(&table));

    let mut driver = WiflyDriver::new(
        &ctx,
        table,
        MockResetPin::new(),
        pumped_delay(&ctx, &module),
        WiflyTimings::default(),
    );

    let mut steps = 0;
    while driver.step().await != StepOutcome::Idle {
        steps += 1;
        assert!(steps <= 12, "bring-up did not finish");
        assert_eq!(ctx.transmit(b"early"), Err(WiflyError::LinkNotReady));
    }
    assert_eq!(steps, 12);
    assert!(ctx.is_ready());

    let commands = module.borrow().commands().to_vec();
    assert!(commands.contains(&b"set w s office$net\r".to_vec()));
    assert!(commands.contains(&b"set w p s3cret-pass\r".to_vec()));

    // Upper-layer traffic both ways
    assert_eq!(ctx.transmit(b"GET /\r\n"), Ok(7));
    module.borrow_mut().inject_rx_data(b"200 OK");

    let mut client_delay = pumped_delay(&ctx, &module);
    let mut reply = [0u8; 6];
    assert_eq!(ctx.receive(&mut reply, &mut client_delay).await, Ok(6));
    assert_eq!(&reply, b"200 OK");
    assert_eq!(module.borrow().data(), b"GET /\r\n");
}

#[tokio::test]
async fn test_bad_reply_restarts_from_command_mode() {
    let ctx = WiflyContext::<NoopRawMutex>::new();
    let table = StateTable::new(&credentials()).unwrap();
    let module = RefCell::new(MockWiflyModule::from_table(&table));
    module.borrow_mut().set_reply(b"set i d 1\r", b"ERR\r\n");

    let mut driver = WiflyDriver::new(
        &ctx,
        table,
        MockResetPin::new(),
        pumped_delay(&ctx, &module),
        WiflyTimings::default(),
    );

    let mut outcome = driver.step().await;
    while let StepOutcome::Advanced { .. } = outcome {
        outcome = driver.step().await;
    }

    assert_eq!(
        outcome,
        StepOutcome::Recovered {
            from: WiflyState::EnableDhcp,
            to: WiflyState::CommandMode,
        }
    );
    assert!(!ctx.is_ready());

    let mut delay = MockDelay::new();
    let mut buf = [0u8; 1];
    assert_eq!(
        ctx.receive(&mut buf, &mut delay).await,
        Err(WiflyError::LinkNotReady)
    );
    assert_eq!(ctx.flush_received(), Err(WiflyError::LinkNotReady));

    let (reset, _delay) = driver.release();
    assert_eq!(reset.pulse_count(), 1);
}

#[test]
fn test_bridge_for_manual_configuration() {
    let mut console = MockUart::new();
    console.inject_rx_data(b"$$$");
    let mut module = MockUart::new();

    {
        let mut bridge = SerialBridge::new(&mut console, &mut module);
        for _ in 0..3 {
            bridge.step();
        }
    }
    assert_eq!(module.tx_buffer(), b"$$$");

    module.inject_rx_data(b"CMD\r\n");
    {
        let mut bridge = SerialBridge::new(&mut console, &mut module);
        for _ in 0..5 {
            bridge.step();
        }
    }
    assert_eq!(console.tx_buffer(), b"$$$CMD\r\n");
    assert_eq!(module.read_available(&mut [0u8; 4]), Ok(0));
}
