//! Binds a small configuration struct and prints the result.
//!
//! ```text
//! cargo run --example quickstart -- --text=hello --rate 0.5
//! PLUM=ripe cargo run --example quickstart -- --help
//! ```

use std::process::ExitCode;

use fieldflags::{FlagError, FlagSet, Flags};

#[derive(Debug, Flags)]
struct Options {
    #[flag = "debug,default=true,Enable debugging output"]
    pub debug: bool,
    #[flag = "text,default=OK,Text to display"]
    pub text: String,
    #[flag = "rate,default=0.1,Rate of increase"]
    pub rate: f64,
    #[flag = "apples,default=*,Apples (defaults to the current value)"]
    pub apples: i64,
    #[flag = "pears,Pears"]
    #[flag_default = "12"]
    pub pears: u32,
    #[flag = "plum,default=$PLUM,Plums"]
    pub plum: String,
    pub ignored: i32,
}

#[expect(clippy::print_stdout, reason = "example program output")]
#[expect(clippy::print_stderr, reason = "example program diagnostics")]
fn main() -> ExitCode {
    let mut options = Options {
        debug: false,
        text: String::new(),
        rate: 0.0,
        apples: 3,
        pears: 0,
        plum: String::new(),
        ignored: 0,
    };
    let mut flags = FlagSet::new("quickstart");
    fieldflags::must_bind(&mut flags, &mut options);

    match flags.parse(std::env::args_os().skip(1)) {
        Ok(()) => {}
        Err(FlagError::Cli(err)) if err.use_stderr() => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
        Err(FlagError::Cli(err)) => {
            print!("{err}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("quickstart: {err}");
            return ExitCode::from(2);
        }
    }
    drop(flags);

    if options.debug {
        println!("{} {}", options.text, options.rate);
    }
    println!(
        "apples={} pears={} plum={:?} ignored={}",
        options.apples, options.pears, options.plum, options.ignored
    );
    ExitCode::SUCCESS
}
