use anyhow::{bail, ensure, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Contents {
    Literal(u64),
    Operator { type_id: u8, subpackets: Vec<Packet> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Packet {
    version: u8,
    contents: Contents,
}

struct BitReader {
    bits: Vec<bool>,
    pos: usize,
}

impl BitReader {
    fn from_hex(hex: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(hex.len() * 4);
        for c in hex.trim().chars() {
            let nibble = c
                .to_digit(16)
                .with_context(|| format!("invalid hex digit {:?}", c))?;
            bits.extend((0..4).rev().map(|i| nibble >> i & 1 == 1));
        }
        Ok(Self { bits, pos: 0 })
    }

    #[cfg(test)]
    fn from_binary(binary: &str) -> Self {
        Self {
            bits: binary.bytes().map(|b| b == b'1').collect(),
            pos: 0,
        }
    }

    fn take(&mut self, n: usize) -> Result<u64> {
        ensure!(
            self.pos + n <= self.bits.len(),
            "transmission ends after {} bits",
            self.bits.len()
        );
        let value = self.bits[self.pos..self.pos + n]
            .iter()
            .fold(0, |acc, &bit| acc << 1 | u64::from(bit));
        self.pos += n;
        Ok(value)
    }

    fn packet(&mut self) -> Result<Packet> {
        let version = self.take(3)? as u8;
        let type_id = self.take(3)? as u8;
        let contents = if type_id == 4 {
            let mut value = 0u64;
            loop {
                let group = self.take(5)?;
                ensure!(value >> 60 == 0, "literal does not fit in 64 bits");
                value = value << 4 | group & 0xf;
                if group & 0x10 == 0 {
                    break;
                }
            }
            Contents::Literal(value)
        } else {
            let mut subpackets = Vec::new();
            if self.take(1)? == 0 {
                let length = self.take(15)? as usize;
                let end = self.pos + length;
                while self.pos < end {
                    subpackets.push(self.packet()?);
                }
                ensure!(self.pos == end, "subpackets overrun their length");
            } else {
                for _ in 0..self.take(11)? {
                    subpackets.push(self.packet()?);
                }
            }
            Contents::Operator {
                type_id,
                subpackets,
            }
        };
        Ok(Packet { version, contents })
    }
}

impl Packet {
    fn version_sum(&self) -> u64 {
        let nested = match &self.contents {
            Contents::Literal(_) => 0,
            Contents::Operator { subpackets, .. } => {
                subpackets.iter().map(Packet::version_sum).sum()
            }
        };
        u64::from(self.version) + nested
    }

    fn value(&self) -> Result<u64> {
        let (type_id, subpackets) = match &self.contents {
            Contents::Literal(value) => return Ok(*value),
            Contents::Operator {
                type_id,
                subpackets,
            } => (*type_id, subpackets),
        };
        let values = subpackets
            .iter()
            .map(Packet::value)
            .collect::<Result<Vec<_>>>()?;
        ensure!(!values.is_empty(), "operator {} without operands", type_id);

        Ok(match type_id {
            0 => values.iter().sum(),
            1 => values.iter().product(),
            2 => values.iter().copied().min().unwrap_or_default(),
            3 => values.iter().copied().max().unwrap_or_default(),
            5..=7 => {
                let &[a, b] = values.as_slice() else {
                    bail!("comparison with {} operands", values.len());
                };
                u64::from(match type_id {
                    5 => a > b,
                    6 => a < b,
                    _ => a == b,
                })
            }
            _ => bail!("unknown operator type {}", type_id),
        })
    }
}

pub fn day16(input: &str) -> Result<(u64, u64)> {
    let packet = BitReader::from_hex(input)?.packet()?;
    Ok((packet.version_sum(), packet.value()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    #[test]
    fn test_literal() -> Result<()> {
        let mut reader = BitReader::from_hex("D2FE28")?;
        assert_eq!(
            reader.packet()?,
            Packet {
                version: 6,
                contents: Contents::Literal(2021)
            }
        );
        assert_eq!(reader.pos, 21);
        Ok(())
    }

    #[test]
    fn test_operator_bit_length() -> Result<()> {
        let packet = BitReader::from_binary(
            "00111000000000000110111101000101001010010001001000000000",
        )
        .packet()?;
        let Contents::Operator { type_id, subpackets } = packet.contents else {
            bail!("expected an operator");
        };
        assert_eq!(type_id, 6);
        let values = subpackets.iter().map(Packet::value).collect::<Result<Vec<_>>>()?;
        assert_eq!(values, [10, 20]);
        Ok(())
    }

    #[test]
    fn test_operator_count() -> Result<()> {
        let packet = BitReader::from_binary(
            "11101110000000001101010000001100100000100011000001100000",
        )
        .packet()?;
        let Contents::Operator { type_id, subpackets } = packet.contents else {
            bail!("expected an operator");
        };
        assert_eq!(type_id, 3);
        let values = subpackets.iter().map(Packet::value).collect::<Result<Vec<_>>>()?;
        assert_eq!(values, [1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_version_sums() -> Result<()> {
        for (hex, expected) in [
            ("8A004A801A8002F478", 16),
            ("620080001611562C8802118E34", 12),
            ("C0015000016115A2E0802F182340", 23),
            ("A0016C880162017C3686B18A3D4780", 31),
        ] {
            assert_eq!(day16(hex)?.0, expected, "{}", hex);
        }
        Ok(())
    }

    #[test]
    fn test_values() -> Result<()> {
        for (hex, expected) in [
            ("C200B40A82", 3),
            ("04005AC33890", 54),
            ("880086C3E88112", 7),
            ("CE00C43D881120", 9),
            ("D8005AC2A8F0", 1),
            ("F600BC2D8F", 0),
            ("9C005AC2F8F0", 0),
            ("9C0141080250320F1802104A08", 1),
        ] {
            assert_eq!(day16(hex)?.1, expected, "{}", hex);
        }
        Ok(())
    }

    #[test]
    fn test_truncated() {
        assert!(day16("D2FE").is_err());
        assert!(day16("XYZ").is_err());
    }

    #[test]
    #[ignore = "needs inputs/16.txt"]
    fn test_day16_input() -> Result<()> {
        assert_eq!(day16(&default_input(16)?)?, (917, 2536453523344));
        Ok(())
    }
}
