mod info;
mod integrate;
mod trace;

use info::run_info;
use integrate::run_integrate;
use trace::run_trace;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Info(args) => run_info(args, ctx),
        Command::Trace(args) => run_trace(args, ctx),
        Command::Integrate(args) => run_integrate(args, ctx),
    }
}

/// Parses a seed isotope argument: digits are the `1000*Z + N`
/// checksum, anything else is a nuclide name.
pub(crate) fn parse_isotope_arg(arg: &str) -> nucflow::IsotopeKey {
    match arg.trim().parse::<u32>() {
        Ok(checksum) => nucflow::IsotopeKey::Checksum(checksum),
        Err(_) => nucflow::IsotopeKey::from(arg.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nucflow::IsotopeKey;

    #[test]
    fn isotope_arg_forms() {
        assert_eq!(parse_isotope_arg("26030"), IsotopeKey::Checksum(26030));
        assert_eq!(parse_isotope_arg(" fe56 "), IsotopeKey::name("fe56"));
        assert_eq!(parse_isotope_arg("p"), IsotopeKey::name("p"));
    }
}
