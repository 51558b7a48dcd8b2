// End-to-end tests: demo programs and libc calls through the flat calling
// convention, with stdout and stderr captured

use clue_rt::demos;
use clue_rt::memory::strings::{from_host_string, to_host_string};
use clue_rt::memory::{Pointer, Store, Value};
use clue_rt::runtime::{startup, EntryArgs, InitializerRegistry, Program, Runtime, RuntimeConfig, RuntimeError};
use clue_rt::stdio::CapturedOutput;
use std::cell::RefCell;
use std::rc::Rc;

fn captured_runtime(config: RuntimeConfig) -> (Runtime, CapturedOutput, CapturedOutput) {
    let stdout = CapturedOutput::new();
    let stderr = CapturedOutput::new();
    let rt = Runtime::with_sinks(config, Box::new(stdout.clone()), Box::new(stderr.clone()));
    (rt, stdout, stderr)
}

fn run_demo(name: &str, args: &[&str]) -> (i64, Vec<String>) {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    let mut program = demos::lookup(name).expect("Unknown demo");
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let code = startup::run(&mut rt, program.as_mut(), &args).expect("Demo failed");
    (code, stdout.lines())
}

fn call_printf(rt: &mut Runtime, format: &str, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let mut flat = from_host_string(format).to_pair().to_vec();
    flat.extend_from_slice(args);
    rt.call("printf", &flat)
}

#[test]
fn test_echo_demo() {
    let (code, lines) = run_demo("echo", &["echo", "alpha", "beta"]);
    assert_eq!(code, 0);
    assert_eq!(
        lines,
        vec![
            "clue echo",
            "argc=3",
            " 0: echo",
            " 1: alpha",
            " 2: beta",
            "ateb",
        ]
    );
}

#[test]
fn test_partialsums_demo_small() {
    let (code, lines) = run_demo("partialsums", &["partialsums", "10"]);
    assert_eq!(code, 0);

    let labels: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.split('\t').nth(1))
        .collect();
    assert_eq!(
        labels,
        vec![
            "(2/3)^k",
            "k^-0.5",
            "1/k(k+1)",
            "Flint Hills",
            "Cookson Hills",
            "Harmonic",
            "Riemann Zeta",
            "Alternating Harmonic",
            "Gregory",
        ]
    );

    // 1/k(k+1) telescopes to 1 - 1/(n+1)
    assert_eq!(lines[2], "0.909090909\t1/k(k+1)");
    // H(10)
    assert_eq!(lines[5], "2.928968254\tHarmonic");

    assert_eq!(lines[9], "");
    assert!(lines[10].starts_with("ELAPSEDTIME="));
}

#[test]
fn test_unknown_demo() {
    let err = demos::lookup("nbody").err().expect("Lookup should fail");
    assert_eq!(err, RuntimeError::UnknownProgram { name: "nbody".to_string() });
}

#[test]
fn test_printf_emits_complete_lines_only() {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    let hello = from_host_string("hi");

    call_printf(&mut rt, "%s\n", &hello.to_pair()).expect("printf failed");
    assert_eq!(stdout.lines(), vec!["hi"]);
    assert_eq!(rt.stdout().pending(), "");

    call_printf(&mut rt, "a\nb", &[]).expect("printf failed");
    assert_eq!(stdout.lines(), vec!["hi", "a"]);
    assert_eq!(rt.stdout().pending(), "b");

    rt.shutdown();
    assert_eq!(stdout.lines(), vec!["hi", "a", "b"]);
    assert_eq!(stdout.joined(), "hi\na\nb");
}

#[test]
fn test_partial_line_dropped_when_configured() {
    let config = RuntimeConfig {
        flush_partial_line_on_exit: false,
        ..RuntimeConfig::default()
    };
    let (mut rt, stdout, _) = captured_runtime(config);
    call_printf(&mut rt, "no newline", &[]).expect("printf failed");
    rt.shutdown();
    assert!(stdout.is_empty());
    assert_eq!(rt.stdout().pending(), "no newline");
}

#[test]
fn test_printf_returns_rendered_length() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let result = call_printf(&mut rt, "%d-%d\n", &[Value::Int(12), Value::Int(345)]).expect("printf failed");
    assert_eq!(result, vec![Value::Int(7)]);
}

#[test]
fn test_printf_null_string_pointer() {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    call_printf(&mut rt, "[%s]\n", &[Value::Int(0), Value::Null]).expect("printf failed");
    assert_eq!(stdout.lines(), vec!["[(null)]"]);
}

#[test]
fn test_printf_mixed_pointers_and_scalars() {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    let name = from_host_string("xxworld");
    let mut args = vec![Value::Int(5)];
    args.extend(name.add(2).to_pair());
    args.push(Value::Float(0.5));
    call_printf(&mut rt, "%d %s %.2f\n", &args).expect("printf failed");
    assert_eq!(stdout.lines(), vec!["5 world 0.50"]);
}

#[test]
fn test_printf_format_error_aborts_call() {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    let result = call_printf(&mut rt, "%*d\n", &[Value::Float(f64::NAN), Value::Int(1)]);
    assert!(matches!(result, Err(RuntimeError::Format(_))));
    rt.shutdown();
    assert!(stdout.is_empty());
}

#[test]
fn test_putc_routes_by_file_identity() {
    let (mut rt, stdout, stderr) = captured_runtime(RuntimeConfig::default());

    let out = rt.stdout_file();
    let err = rt.stderr_file();
    for c in "ok\n".chars() {
        let mut args = vec![Value::Int(c as i64)];
        args.extend(out.to_pair());
        assert_eq!(rt.call("putc", &args).expect("putc failed"), vec![Value::Int(c as i64)]);
    }
    let mut args = vec![Value::Int('!' as i64)];
    args.extend(err.to_pair());
    rt.call("putc", &args).expect("putc failed");

    let other = Pointer::to_start(Store::filled(1, Value::Int(0)));
    let mut args = vec![Value::Int('x' as i64)];
    args.extend(other.to_pair());
    assert_eq!(rt.call("putc", &args).expect("putc failed"), vec![Value::Int(-1)]);

    assert_eq!(stdout.lines(), vec!["ok"]);
    assert!(stderr.is_empty());
    rt.shutdown();
    assert_eq!(stderr.lines(), vec!["!"]);
}

#[test]
fn test_malloc_strcpy_round_trip() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let block = rt.call("malloc", &[Value::Int(16)]).expect("malloc failed");
    assert_eq!(block.len(), 2);
    let dest = Pointer::from_pair(&block[0], &block[1]).expect("malloc returned NULL");

    let src = from_host_string("copied");
    let mut args = dest.to_pair().to_vec();
    args.extend(src.to_pair());
    let returned = rt.call("strcpy", &args).expect("strcpy failed");
    assert_eq!(returned, dest.to_pair().to_vec());
    assert_eq!(to_host_string(&dest), "copied");
}

#[test]
fn test_calloc_zeroes_and_counts() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let block = rt.call("calloc", &[Value::Int(4), Value::Int(8)]).expect("calloc failed");
    let p = Pointer::from_pair(&block[0], &block[1]).expect("calloc returned NULL");
    assert_eq!(p.store.to_vec(), vec![Value::Int(0); 32]);
    assert_eq!(rt.heap().allocation_count(), 1);
    assert_eq!(rt.heap().zeroed_cells(), 32);
}

#[test]
fn test_memset_writes_one_fewer_cell() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let dest = Pointer::to_start(Store::filled(4, Value::Int(9)));
    let mut args = dest.to_pair().to_vec();
    args.extend([Value::Int(1), Value::Int(3)]);
    rt.call("memset", &args).expect("memset failed");
    assert_eq!(
        dest.store.to_vec(),
        vec![Value::Int(1), Value::Int(1), Value::Int(9), Value::Int(9)]
    );
}

#[test]
fn test_atoi_and_atol() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let text = from_host_string("  -42abc");
    assert_eq!(rt.call("atoi", &text.to_pair()).expect("atoi failed"), vec![Value::Int(-42)]);
    let text = from_host_string("4294967296");
    assert_eq!(rt.call("atol", &text.to_pair()).expect("atol failed"), vec![Value::Int(4294967296)]);
    assert_eq!(rt.call("atoi", &text.to_pair()).expect("atoi failed"), vec![Value::Int(0)]);
}

#[test]
fn test_gettimeofday_fills_two_cells() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    let tv = Pointer::to_start(Store::filled(2, Value::Int(0)));
    let mut args = tv.to_pair().to_vec();
    args.extend([Value::Int(0), Value::Null]);
    assert_eq!(rt.call("gettimeofday", &args).expect("gettimeofday failed"), vec![Value::Int(0)]);
    assert!(tv.read(0).as_int() > 1_000_000_000);
    let micros = tv.read(1).as_int();
    assert!((0..1_000_000).contains(&micros));
}

#[test]
fn test_unknown_symbol_and_arity() {
    let (mut rt, _, _) = captured_runtime(RuntimeConfig::default());
    assert!(!rt.provides("fopen"));
    assert_eq!(
        rt.call("fopen", &[]),
        Err(RuntimeError::UnknownSymbol { name: "fopen".to_string() })
    );
    assert!(matches!(
        rt.call("malloc", &[]),
        Err(RuntimeError::ArgumentCountMismatch { .. })
    ));
}

struct Recorder {
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Program for Recorder {
    fn register_initializers(&mut self, registry: &mut InitializerRegistry) -> Result<(), RuntimeError> {
        for name in ["first", "second"] {
            let log = self.log.clone();
            registry.register(move || log.borrow_mut().push(name))?;
        }
        Ok(())
    }

    fn main(&mut self, rt: &mut Runtime, entry: EntryArgs) -> Result<i64, RuntimeError> {
        self.log.borrow_mut().push("main");
        let name = entry.arg_pointer(0).expect("argv[0] missing");
        let mut args = from_host_string("%s").to_pair().to_vec();
        args.extend(name.to_pair());
        rt.call("printf", &args)?;
        Ok(entry.argc as i64 + 40)
    }
}

#[test]
fn test_startup_order_and_exit_code() {
    let (mut rt, stdout, _) = captured_runtime(RuntimeConfig::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut program = Recorder { log: log.clone() };
    let args = vec!["recorder".to_string(), "x".to_string()];

    let code = startup::run(&mut rt, &mut program, &args).expect("Program failed");
    assert_eq!(code, 42);
    assert_eq!(*log.borrow(), vec!["first", "second", "main"]);
    // Partial line emitted at exit
    assert_eq!(stdout.lines(), vec!["recorder"]);
}
