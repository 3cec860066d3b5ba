//! Parallel kernel benchmark CLI
//!
//! Runs one numeric kernel over an N-element domain with W worker threads,
//! each repeating its partition R times, and reports wall-clock time plus a
//! checksum over the output buffer.
//!
//! # Output Format
//!
//! One line on stdout:
//! `n=<N> threads=<W> reps=<R> time=<seconds> checksum=<sum>`
//!
//! Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - `0`: success
//! - `1`: bad arguments, allocation failure, worker failure, or
//!   verification mismatch

use parbench::{run, AlignedBuf, Axpy, Kernel, RunConfig, VecAdd};
use std::env;
use std::process;

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS] <n> <threads> <reps>

    <n>        domain size (positive integer)
    <threads>  worker count (positive integer, or 'auto' for CPU count)
    <reps>     kernel repetitions per worker (positive integer)

OPTIONS:
    --alpha=<A>      scalar coefficient for the axpy kernel (default: 2.5)
    --kernel=<NAME>  kernel to run: axpy | vadd (default: axpy)
    --verify         also run a single-threaded reference and compare
    --help, -h       show this help message",
        exe.to_string_lossy()
    );
}

fn main() {
    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "parbench".into());

    let mut alpha = 2.5f64;
    let mut kernel_name = String::from("axpy");
    let mut verify = false;
    let mut positional: Vec<String> = Vec::new();

    for arg in args {
        let Some(arg) = arg.to_str().map(str::to_owned) else {
            print_usage(&exe);
            process::exit(1);
        };

        if let Some(value) = arg.strip_prefix("--alpha=") {
            alpha = value.parse().unwrap_or_else(|_| {
                eprintln!("invalid --alpha value: {value}");
                process::exit(1);
            });
            continue;
        }
        if let Some(value) = arg.strip_prefix("--kernel=") {
            kernel_name = value.to_owned();
            continue;
        }
        match arg.as_str() {
            "--verify" => {
                verify = true;
                continue;
            }
            "--help" | "-h" => {
                print_usage(&exe);
                process::exit(0);
            }
            flag if flag.starts_with("--") => {
                eprintln!("unknown flag: {flag}");
                print_usage(&exe);
                process::exit(1);
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 3 {
        print_usage(&exe);
        process::exit(1);
    }

    let n = parse_positive(&positional[0], "<n>");
    let workers = if positional[1] == "auto" {
        num_cpus::get().max(1)
    } else {
        parse_positive(&positional[1], "<threads>")
    };
    let reps = parse_positive(&positional[2], "<reps>") as u64;

    let kernel: &dyn Kernel = match kernel_name.as_str() {
        "axpy" => &Axpy { a: alpha },
        "vadd" => &VecAdd,
        other => {
            eprintln!("unknown kernel: {other} (expected axpy or vadd)");
            process::exit(1);
        }
    };

    // Workload init matches the reference benchmark: x ramps over [0, 1),
    // y starts at 1.0 everywhere.
    let x_init = |i: usize| i as f64 / (n as f64 + 1.0);
    let x = AlignedBuf::from_fn(n, x_init).unwrap_or_else(die);
    let mut y = AlignedBuf::from_fn(n, |_| 1.0).unwrap_or_else(die);

    let config = RunConfig { n, workers, reps };
    let report = run(&config, kernel, &x, &mut y).unwrap_or_else(die);

    if verify {
        // Sequential reference over the same initial state. Identical
        // per-element arithmetic in identical order, so the checksums must
        // agree exactly; the tolerance only guards a future kernel that
        // reassociates its inner loop.
        let mut y_ref = AlignedBuf::from_fn(n, |_| 1.0).unwrap_or_else(die);
        kernel.apply(&x, &mut y_ref, reps);
        let expected = parbench::checksum(&y_ref);

        let rel = (report.checksum - expected).abs() / expected.abs().max(1.0);
        if rel > 1e-12 {
            eprintln!(
                "verification FAILED: parallel checksum {} vs reference {} (rel err {rel:e})",
                report.checksum, expected
            );
            process::exit(1);
        }
        eprintln!("verification OK: checksum matches sequential reference");
    }

    println!("{report}");
}

/// Parse a positive integer argument or exit with usage semantics.
fn parse_positive(value: &str, what: &str) -> usize {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => v,
        _ => {
            eprintln!("{what} must be a positive integer, got: {value}");
            process::exit(1);
        }
    }
}

/// Report a fatal error and exit 1.
fn die<E: std::fmt::Display, T>(err: E) -> T {
    eprintln!("error: {err}");
    process::exit(1);
}
