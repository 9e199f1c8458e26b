//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{SdkConfig, SdkError};
use bloomer_core::{from_base_units, Balances, Token};
use ethnum::U256;

/// A `balanceOf` read (or the native balance for ETH), in base units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawBalance {
    pub token: Token,
    pub amount: U256,
    /// Decimals reported by the token contract, if they were read alongside the balance.
    pub decimals: Option<u8>,
}

impl RawBalance {
    pub fn new(token: Token, amount: U256) -> Self {
        Self { token, amount, decimals: None }
    }
}

/// Converts on-chain balance reads into [`Balances`].
pub struct BalanceReader<'a> {
    config: &'a SdkConfig,
}

impl<'a> BalanceReader<'a> {
    pub fn new(config: &'a SdkConfig) -> Self {
        Self { config }
    }

    /// Balances of an account that is not connected.
    pub fn disconnected(&self) -> Balances {
        Balances::new()
    }

    /// Builds the balances of the connected account. Contract-reported decimals take precedence
    /// over configured ones.
    pub fn read(&self, raw: &[RawBalance]) -> Result<Balances, SdkError> {
        let mut balances = Balances::new();
        for balance in raw {
            let decimals = balance.decimals.unwrap_or_else(|| self.config.decimals(balance.token));
            balances.set(balance.token, from_base_units(balance.amount, decimals)?);
        }
        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomer_core::{AMOUNT_EXCEEDS_DECIMAL_RANGE, INVALID_DECIMALS};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_read_balances() {
        let config = SdkConfig::default();
        let reader = BalanceReader::new(&config);
        let balances = reader
            .read(&[
                RawBalance::new(Token::Eth, U256::from(12_584_700_000_000_000_000u128)),
                RawBalance::new(Token::Usdc, U256::from(5_000_000_000u128)),
                RawBalance {
                    token: Token::Usdt,
                    amount: U256::from(2_500u128),
                    decimals: Some(2),
                },
            ])
            .unwrap();

        assert_eq!(balances.get(Token::Eth), Decimal::from_str("12.5847").unwrap());
        assert_eq!(balances.get(Token::Usdc), Decimal::from(5_000));
        assert_eq!(balances.get(Token::Usdt), Decimal::from(25));
        assert_eq!(balances.get(Token::Bloom), Decimal::ZERO);
    }

    #[test]
    fn test_disconnected() {
        let config = SdkConfig::default();
        assert!(BalanceReader::new(&config).disconnected().is_empty());
    }

    #[test]
    fn test_read_rejects_bad_values() {
        let config = SdkConfig::default();
        let reader = BalanceReader::new(&config);

        let result = reader.read(&[RawBalance::new(Token::Bloom, U256::MAX)]);
        assert!(matches!(result, Err(SdkError::Core(AMOUNT_EXCEEDS_DECIMAL_RANGE))));

        let result = reader.read(&[RawBalance {
            token: Token::Bloom,
            amount: U256::ONE,
            decimals: Some(77),
        }]);
        assert!(matches!(result, Err(SdkError::Core(INVALID_DECIMALS))));
    }
}
