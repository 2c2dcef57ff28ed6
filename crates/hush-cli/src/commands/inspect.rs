use hush_core::crypto::payload::{decode_blob, CipherPayload, TAG_LENGTH};

use crate::app::{read_blob, AppContext};
use crate::cli::InspectArgs;
use crate::errors::CliError;
use crate::ui::{divider, header, kv};

/// Framing of a blob, read without the passphrase.
struct Framing {
    salt: String,
    nonce: String,
    sealed_bytes: usize,
    ciphertext_bytes: usize,
}

fn inspect_blob(blob: &str) -> Result<Framing, CliError> {
    let bytes = decode_blob(blob)?;
    let payload = CipherPayload::parse(&bytes)?;
    Ok(Framing {
        salt: hex::encode(payload.salt()),
        nonce: hex::encode(payload.nonce()),
        sealed_bytes: payload.sealed().len(),
        ciphertext_bytes: payload.ciphertext_len(),
    })
}

pub fn handle_inspect(ctx: &AppContext<'_>, args: &InspectArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json);
    let blob = read_blob(args.blob.as_deref())?;
    let framing = inspect_blob(&blob)?;

    if ui.mode.is_json() {
        let output = serde_json::json!({
            "salt": framing.salt,
            "nonce": framing.nonce,
            "sealed_bytes": framing.sealed_bytes,
            "ciphertext_bytes": framing.ciphertext_bytes,
            "tag_bytes": TAG_LENGTH,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut lines = Vec::new();
    if ui.mode.is_pretty() && !ctx.quiet() {
        lines.push(header(&ui, "inspect", None));
        lines.push(divider(&ui));
    }
    lines.push(kv(&ui, "Salt", &framing.salt));
    lines.push(kv(&ui, "Nonce", &framing.nonce));
    lines.push(kv(&ui, "Sealed bytes", &framing.sealed_bytes.to_string()));
    lines.push(kv(&ui, "Ciphertext bytes", &framing.ciphertext_bytes.to_string()));
    lines.push(kv(&ui, "Tag bytes", &TAG_LENGTH.to_string()));
    println!("{}", lines.join("\n"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_inspect_reports_framing() {
        let mut bytes = vec![0xAA; 16];
        bytes.extend([0xBB; 12]);
        bytes.extend([0xCC; 21]);
        let framing = inspect_blob(&STANDARD.encode(&bytes)).unwrap();

        assert_eq!(framing.salt, "aa".repeat(16));
        assert_eq!(framing.nonce, "bb".repeat(12));
        assert_eq!(framing.sealed_bytes, 21);
        assert_eq!(framing.ciphertext_bytes, 5);
    }

    #[test]
    fn test_inspect_rejects_short_blob() {
        let err = inspect_blob(&STANDARD.encode([0u8; 28])).err().unwrap();
        assert_eq!(err.exit_code(), crate::constants::exit_codes::MALFORMED);
    }
}
