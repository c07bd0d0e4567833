use anyhow::Result;
use rand::Rng;

use crate::widgets::quote::QUOTES;

pub fn execute() -> Result<()> {
    let index = rand::thread_rng().gen_range(0..QUOTES.len());
    println!("{}", QUOTES[index]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_succeeds() {
        assert!(execute().is_ok());
    }
}
