/// Implements Anchor's account traits for a plain borsh struct, using the
/// discriminator the deployed program writes in the first eight bytes.
macro_rules! anchor_account {
    ($name:ident, $discriminator:expr) => {
        impl anchor_lang::Discriminator for $name {
            const DISCRIMINATOR: &'static [u8] = &$discriminator;
        }

        impl anchor_lang::AccountSerialize for $name {
            fn try_serialize<W: std::io::Write>(&self, writer: &mut W) -> anchor_lang::Result<()> {
                writer
                    .write_all(<$name as anchor_lang::Discriminator>::DISCRIMINATOR)
                    .map_err(|_| anchor_lang::error::ErrorCode::AccountDidNotSerialize)?;
                anchor_lang::AnchorSerialize::serialize(self, writer)
                    .map_err(|_| anchor_lang::error::ErrorCode::AccountDidNotSerialize)?;
                Ok(())
            }
        }

        impl anchor_lang::AccountDeserialize for $name {
            fn try_deserialize(buf: &mut &[u8]) -> anchor_lang::Result<Self> {
                let discriminator = <$name as anchor_lang::Discriminator>::DISCRIMINATOR;
                if buf.len() < discriminator.len() {
                    return Err(anchor_lang::error::ErrorCode::AccountDiscriminatorNotFound.into());
                }
                if &buf[..discriminator.len()] != discriminator {
                    return Err(anchor_lang::error::ErrorCode::AccountDiscriminatorMismatch.into());
                }
                Self::try_deserialize_unchecked(buf)
            }

            fn try_deserialize_unchecked(buf: &mut &[u8]) -> anchor_lang::Result<Self> {
                let discriminator_len = <$name as anchor_lang::Discriminator>::DISCRIMINATOR.len();
                if buf.len() < discriminator_len {
                    return Err(anchor_lang::error::ErrorCode::AccountDiscriminatorNotFound.into());
                }
                let mut data: &[u8] = &buf[discriminator_len..];
                anchor_lang::AnchorDeserialize::deserialize(&mut data)
                    .map_err(|_| anchor_lang::error::ErrorCode::AccountDidNotDeserialize.into())
            }
        }
    };
}
pub(crate) use anchor_account;

pub mod global_state;
pub use global_state::*;

pub mod validator;
pub use validator::*;

pub mod user_info;
pub use user_info::*;
