//! End-to-end proxy tests
//!
//! Exercises the full build pipeline: descriptor → cached layout → proxy
//! instance → intercepted call, including a forwarding middleware that
//! dispatches to a real target object.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Barrier};
use veneer_core::{
    args, build, middleware, CallError, Contract, InterfaceDescriptor, Middleware, Proxy,
    ProxyBuilder, Target, TypeTag, Value,
};

/// The real object the proxies forward to
struct Counter {
    count: AtomicI32,
    label: parking_lot::Mutex<String>,
}

impl Counter {
    fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
            label: parking_lot::Mutex::new(String::from("target-label")),
        }
    }

    fn increment(&self, by: i32) -> i32 {
        self.count.fetch_add(by, Ordering::SeqCst) + by
    }
}

fn counter_descriptor() -> InterfaceDescriptor {
    InterfaceDescriptor::builder("it::ICounter")
        .method("increment", [TypeTag::I32], TypeTag::I32)
        .property("Label", TypeTag::Str)
        .build()
}

/// A middleware that invokes the real method on the target
fn forwarding() -> Middleware {
    middleware(|_proxy, _ret, target, sig, args| {
        let counter = target
            .downcast_ref::<Counter>()
            .ok_or("target is not a Counter")?;
        match sig.name.as_str() {
            "increment" => {
                let by = args[0].as_i32().ok_or("increment takes an i32")?;
                Ok(Value::i32(counter.increment(by)))
            }
            other => Err(format!("no such method on Counter: {other}").into()),
        }
    })
}

fn build_counter_proxy(target: Arc<Counter>) -> Proxy {
    ProxyBuilder::new(counter_descriptor())
        .target(target)
        .middleware(forwarding())
        .build()
        .unwrap()
}

#[test]
fn forwarding_middleware_drives_the_target() {
    let counter = Arc::new(Counter::new());
    let proxy = build_counter_proxy(Arc::clone(&counter));

    assert_eq!(proxy.call("increment", &[Value::i32(5)]).unwrap(), Value::i32(5));
    assert_eq!(proxy.call("increment", &[Value::i32(2)]).unwrap(), Value::i32(7));
    assert_eq!(counter.count.load(Ordering::SeqCst), 7);
}

#[test]
fn synthesis_is_idempotent_across_builds() {
    let counter = Arc::new(Counter::new());
    let a = build_counter_proxy(Arc::clone(&counter));

    // Different target, different middleware — same interface
    let b = ProxyBuilder::new(counter_descriptor())
        .target(Arc::new(Counter::new()))
        .middleware(middleware(|_, _, _, _, _| Ok(Value::i32(-1))))
        .build()
        .unwrap();

    // One synthesized layout, two independent instances
    assert!(Arc::ptr_eq(a.layout(), b.layout()));
    a.set("Label", Value::str("a")).unwrap();
    assert_eq!(b.get("Label").unwrap(), Value::str(""));
}

#[test]
fn argument_fidelity() {
    let recorded: Arc<parking_lot::Mutex<Vec<Value>>> = Arc::new(parking_lot::Mutex::new(vec![]));
    let desc = InterfaceDescriptor::builder("it::IRecorder")
        .method(
            "record",
            [TypeTag::I32, TypeTag::Str, TypeTag::Bool],
            TypeTag::Unit,
        )
        .build();

    let sink = Arc::clone(&recorded);
    let proxy = ProxyBuilder::new(desc)
        .target(Arc::new(()))
        .middleware(middleware(move |_, _, _, _, args| {
            *sink.lock() = args.to_vec();
            Ok(Value::null())
        }))
        .build()
        .unwrap();

    proxy
        .call("record", &[Value::i32(1), Value::str("x"), Value::bool(true)])
        .unwrap();

    let seen = recorded.lock();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], Value::i32(1));
    assert_eq!(seen[1], Value::str("x"));
    assert_eq!(seen[2], Value::bool(true));
}

#[test]
fn return_coercion_both_ways() {
    let desc = InterfaceDescriptor::builder("it::IAnswer")
        .method("answer", [], TypeTag::I32)
        .build();

    let well_typed = ProxyBuilder::new(desc.clone())
        .target(Arc::new(()))
        .middleware(middleware(|_, _, _, _, _| Ok(Value::i32(42))))
        .build()
        .unwrap();
    assert_eq!(well_typed.call("answer", &[]).unwrap(), Value::i32(42));

    let ill_typed = ProxyBuilder::new(desc)
        .target(Arc::new(()))
        .middleware(middleware(|_, _, _, _, _| Ok(Value::str("42"))))
        .build()
        .unwrap();
    assert!(matches!(
        ill_typed.call("answer", &[]).unwrap_err(),
        CallError::ReturnMismatch {
            expected: TypeTag::I32,
            got: "str",
            ..
        }
    ));
}

#[test]
fn proxy_properties_are_isolated_from_the_target() {
    let counter = Arc::new(Counter::new());
    let proxy = build_counter_proxy(Arc::clone(&counter));

    // Fresh slot starts at the kind's zero value, not the target's state
    assert_eq!(proxy.get("Label").unwrap(), Value::str(""));

    proxy.set("Label", Value::str("proxy-label")).unwrap();
    assert_eq!(proxy.get("Label").unwrap(), Value::str("proxy-label"));
    assert_eq!(*counter.label.lock(), "target-label");

    *counter.label.lock() = String::from("mutated");
    assert_eq!(proxy.get("Label").unwrap(), Value::str("proxy-label"));
}

#[test]
fn middleware_receives_declared_return_kind_and_descriptor() {
    let desc = InterfaceDescriptor::builder("it::IMeta")
        .method("first", [], TypeTag::Unit)
        .method("second", [TypeTag::F64], TypeTag::F64)
        .build();

    let proxy = ProxyBuilder::new(desc)
        .target(Arc::new(()))
        .middleware(middleware(|proxy, ret, _, sig, _| {
            let position = proxy.layout().method_position(&sig.name).unwrap();
            match sig.name.as_str() {
                "first" => {
                    assert_eq!(position, 0);
                    assert_eq!(ret, TypeTag::Unit);
                    Ok(Value::null())
                }
                "second" => {
                    assert_eq!(position, 1);
                    assert_eq!(ret, TypeTag::F64);
                    Ok(Value::f64(1.5))
                }
                _ => Err("unexpected".into()),
            }
        }))
        .build()
        .unwrap();

    proxy.call("first", &[]).unwrap();
    assert_eq!(
        proxy.call("second", &[Value::f64(0.5)]).unwrap(),
        Value::f64(1.5)
    );
}

#[test]
fn concurrent_first_use_commits_one_layout() {
    const THREADS: usize = 8;

    // A descriptor no other test builds, so every thread races the miss
    let desc = InterfaceDescriptor::builder("it::IConcurrent")
        .method("tick", [], TypeTag::I32)
        .property("Seen", TypeTag::Bool)
        .build();

    let barrier = Arc::new(Barrier::new(THREADS));
    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let desc = desc.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(std::thread::spawn(move || {
            barrier.wait();
            ProxyBuilder::new(desc)
                .target(Arc::new(()))
                .middleware(middleware(|_, _, _, _, _| Ok(Value::i32(1))))
                .build()
                .unwrap()
        }));
    }

    let proxies: Vec<Proxy> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(proxies.len(), THREADS);

    // Exactly one layout committed: every instance shares it by pointer
    let reference = proxies[0].layout();
    for proxy in &proxies {
        assert!(Arc::ptr_eq(proxy.layout(), reference));
        // And each instance is independently usable
        assert_eq!(proxy.call("tick", &[]).unwrap(), Value::i32(1));
        proxy.set("Seen", Value::bool(true)).unwrap();
    }
}

#[test]
fn typed_contract_facade() {
    struct CounterFacade {
        proxy: Proxy,
    }

    impl Contract for CounterFacade {
        fn descriptor() -> InterfaceDescriptor {
            InterfaceDescriptor::builder("it::ITypedCounter")
                .method("increment", [TypeTag::I32], TypeTag::I32)
                .build()
        }

        fn wrap(proxy: Proxy) -> Self {
            Self { proxy }
        }
    }

    impl CounterFacade {
        fn increment(&self, by: i32) -> Result<i32, CallError> {
            let out = self.proxy.call("increment", &[Value::i32(by)])?;
            Ok(out.as_i32().unwrap_or_default())
        }
    }

    let counter: Target = Arc::new(Counter::new());
    let facade: CounterFacade = build(counter, forwarding()).unwrap();
    assert_eq!(facade.increment(3).unwrap(), 3);
    assert_eq!(facade.increment(4).unwrap(), 7);

    // The Args container remains a consumer-side convenience
    let snapshot = args![3, "increments so far", true];
    assert_eq!(snapshot.get::<i32>(0).unwrap(), 3);
    assert_eq!(snapshot.get::<i32>(9).unwrap(), 0);
}
