pub mod arith;
pub mod elgamal;
pub mod prime;
pub mod rsa;

// Re-export prime sources
pub use prime::{FixedPrime, PrimeSupplier, RandomPrimeSupplier};

// Re-export RSA functionality
pub use self::rsa::{RSAKeyGenConfig, RSAKeyPair};

// Re-export ElGamal functionality
pub use elgamal::{
    cipher::{elgamal_decrypt, elgamal_encrypt},
    signer::{elgamal_sign, elgamal_verify},
    ElGamalCiphertext, ElGamalEncryptConfig, ElGamalKeyGenConfig, ElGamalKeyPair,
    ElGamalKeyStore, ElGamalParams, ElGamalParamsConfig, ElGamalPrivateKey, ElGamalPublicKey,
    ElGamalSignConfig, ElGamalSignature,
};
