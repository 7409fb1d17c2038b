use std::time::Duration;

use fieldflags::{FlagSet, Flags};

#[derive(Flags)]
struct Config {
    #[flag = "name,default=world,Who to greet"]
    pub name: String,
    #[flag = "wait,default=1s,Delay before greeting"]
    pub wait: Duration,
    #[flag = "loud,Shout the greeting"]
    pub loud: bool,
    pub internal: Vec<u8>,
}

fn main() -> Result<(), fieldflags::FlagError> {
    let mut config = Config {
        name: String::new(),
        wait: Duration::ZERO,
        loud: false,
        internal: Vec::new(),
    };
    let mut flags = FlagSet::new("greet");
    fieldflags::bind(&mut flags, &mut config)?;
    flags.parse(["--loud"])?;
    drop(flags);
    assert!(config.loud);
    assert_eq!(config.name, "world");
    assert!(config.internal.is_empty());
    Ok(())
}
