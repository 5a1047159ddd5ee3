pub mod error;
pub mod security;

pub use error::{Error, Result};
pub use security::{
    ElGamalKeyPair, ElGamalKeyStore, ElGamalParams, ElGamalPrivateKey, ElGamalPublicKey,
    RSAKeyPair,
};
