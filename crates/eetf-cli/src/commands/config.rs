//! Print the resolved operator as YAML.

use anyhow::Result;

use super::load_operator;
use crate::ConfigArgs;

pub fn run(args: ConfigArgs) -> Result<()> {
    let op = load_operator(&args.curve)?;
    print!("{}", op.to_yaml_string()?);
    Ok(())
}
