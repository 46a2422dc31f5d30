//! Bid redemption tickets.
//!
//! V2 tickets are read by hand: an optional winner index sits at offset 1,
//! and the auction manager key that follows moves depending on whether the
//! index is there. The index is reported as the raw 8-byte window after the
//! key byte, the way existing clients read it. V1 tickets are recognized but
//! no longer decoded.

use solana_address::Address;
use tracing::trace;

use super::{MetaplexKey, MetaplexProgram};
use crate::codec::{address_from_text, Record, Scalar, Value, PUBLIC_KEY_LEN};
use crate::error::at_least;
use crate::programs::key_text;
use crate::versioned::{Version, Versions};
use crate::{AccountData, DataError, Error};

/// Offset of the auction manager key, indexed by whether the winner index is
/// present.
pub const WINNER_INDEX_OFFSETS: [usize; 2] = [2, 10];

const WINNER_INDEX_OFFSET: usize = 1;

static VERSIONS: Versions<MetaplexKey> = Versions::new(
    BidRedemptionTicket::KIND,
    &[
        Version::deprecated(MetaplexKey::BidRedemptionTicketV1),
        Version::custom(MetaplexKey::BidRedemptionTicketV2, decode_v2),
    ],
);

/// Decode a V2 ticket.
///
/// Offset 1 holds the presence byte of the winner index. When it is zero the
/// index is absent and the manager key follows at offset 2, whatever the
/// bytes after it hold. When it is non-zero the winner index is the
/// little-endian window `data[1..9]`, presence byte included, and the manager
/// key follows the stored index at offset 10.
fn decode_v2(data: &[u8]) -> Result<Record, Error> {
    at_least(data, WINNER_INDEX_OFFSET + 1)?;
    let presence = data[WINNER_INDEX_OFFSET];
    let winner_index = if presence != 0 {
        let (index, _) = Scalar::U64.codec().decode_at(data, WINNER_INDEX_OFFSET)?;
        index
    } else {
        Value::Absent
    };
    let offset = WINNER_INDEX_OFFSETS[usize::from(!winner_index.is_absent())];
    at_least(data, offset + PUBLIC_KEY_LEN)?;
    let (auction_manager, _) = Scalar::PublicKey
        .codec()
        .decode_at(data, offset)
        .map_err(|e| e.in_field("auction_manager"))?;
    trace!(present = !winner_index.is_absent(), offset, "decoded legacy ticket");

    Ok(Record::new()
        .with("key", Value::U8(MetaplexKey::BidRedemptionTicketV2.into()))
        .with("winner_index", winner_index)
        .with("auction_manager", auction_manager)
        .with("data", Value::Bytes(data.to_vec())))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidRedemptionTicketV2 {
    pub winner_index: Option<u64>,
    pub auction_manager: String,
    /// The full account buffer, for fields past the manager key.
    pub data: Vec<u8>,
}

/// A bid redemption ticket in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BidRedemptionTicket {
    V2(BidRedemptionTicketV2),
}

impl BidRedemptionTicketV2 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        let data = match record.value("data") {
            Value::Bytes(bytes) => bytes.clone(),
            _ => return Err(DataError::MissingValue.in_field("data")),
        };
        Ok(Self {
            winner_index: record.optional_u64("winner_index")?,
            auction_manager: key_text(record, "auction_manager")?,
            data,
        })
    }
}

impl BidRedemptionTicket {
    pub fn winner_index(&self) -> Option<u64> {
        match self {
            BidRedemptionTicket::V2(v2) => v2.winner_index,
        }
    }

    pub fn auction_manager(&self) -> &str {
        match self {
            BidRedemptionTicket::V2(v2) => &v2.auction_manager,
        }
    }

    /// The auction manager as an address.
    pub fn auction_manager_address(&self) -> Result<Address, DataError> {
        address_from_text(self.auction_manager())
    }
}

impl AccountData for BidRedemptionTicket {
    type Program = MetaplexProgram;
    const KIND: &'static str = "BidRedemptionTicket";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (_, record) = VERSIONS.decode(data)?;
        Ok(BidRedemptionTicket::V2(BidRedemptionTicketV2::from_record(&record)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANAGER: [u8; 32] = [7; 32];

    fn ticket(winner_index: Option<u64>) -> Vec<u8> {
        let mut data = vec![11u8];
        match winner_index {
            Some(index) => {
                data.push(1);
                data.extend_from_slice(&index.to_le_bytes());
            }
            None => data.push(0),
        }
        data.extend_from_slice(&MANAGER);
        data.extend_from_slice(&[0xee; 12]);
        data
    }

    fn window(data: &[u8]) -> u64 {
        u64::from_le_bytes(data[1..9].try_into().unwrap())
    }

    #[test]
    fn test_without_winner_index() {
        // A zero presence byte wins even though the manager bytes after it
        // make the window non-zero.
        let data = ticket(None);
        assert_ne!(window(&data), 0);
        let decoded = BidRedemptionTicket::decode(&data).unwrap();
        assert_eq!(decoded.winner_index(), None);
        assert_eq!(decoded.auction_manager(), bs58::encode(MANAGER).into_string());
        assert_eq!(
            decoded.auction_manager_address().unwrap(),
            Address::new_from_array(MANAGER)
        );
    }

    #[test]
    fn test_with_winner_index() {
        let data = ticket(Some(3));
        let decoded = BidRedemptionTicket::decode(&data).unwrap();
        assert_eq!(decoded.winner_index(), Some(window(&data)));
        assert_eq!(decoded.winner_index(), Some(1 + (3 << 8)));
        assert_eq!(decoded.auction_manager(), bs58::encode(MANAGER).into_string());
        assert_eq!(&data[10..42], &MANAGER);
    }

    #[test]
    fn test_manager_offset_follows_presence() {
        let mut data = ticket(Some(0));
        let decoded = BidRedemptionTicket::decode(&data).unwrap();
        assert_eq!(decoded.winner_index(), Some(1));
        assert_eq!(decoded.auction_manager(), bs58::encode(MANAGER).into_string());

        // Clearing the presence byte moves the manager read back to offset 2.
        data[1] = 0;
        let decoded = BidRedemptionTicket::decode(&data).unwrap();
        assert_eq!(decoded.winner_index(), None);
        assert_eq!(
            decoded.auction_manager(),
            bs58::encode(&data[2..34]).into_string()
        );
    }

    #[test]
    fn test_short_ticket() {
        let data = ticket(Some(3));
        assert!(BidRedemptionTicket::decode(&data[..42]).is_ok());
        assert!(matches!(
            BidRedemptionTicket::decode(&data[..41]),
            Err(Error::InvalidAccountData(DataError::EndOfBuffer { needed: 42, .. }))
        ));
        assert!(matches!(
            BidRedemptionTicket::decode(&[11]),
            Err(Error::InvalidAccountData(DataError::EndOfBuffer { needed: 2, .. }))
        ));
    }

    #[test]
    fn test_v1_deprecated() {
        let mut data = ticket(None);
        data[0] = 2;
        assert!(matches!(
            BidRedemptionTicket::decode(&data),
            Err(Error::DeprecatedFormat {
                kind: "BidRedemptionTicket",
                discriminant: 2
            })
        ));
    }
}
