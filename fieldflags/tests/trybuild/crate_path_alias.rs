use fieldflags as flagkit;

#[derive(flagkit::Flags)]
#[flags(crate = "flagkit")]
struct Limits {
    #[flag = "retries,default=3,Attempts before giving up"]
    pub retries: u64,
}

fn main() {
    let mut limits = Limits { retries: 0 };
    let fields = flagkit::must_check(&mut limits);
    assert_eq!(fields.len(), 1);
}
