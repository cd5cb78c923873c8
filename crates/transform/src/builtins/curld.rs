use crate::{RegistryError, Transform, from_fn};

/// Unescapes `\"` sequences, as found in payloads copied from curl commands.
pub fn curld() -> Result<Transform, RegistryError> {
	Transform::builder("curld").build(from_fn(|text, _| Ok(text.replace("\\\"", "\""))))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn unescapes_quotes() {
		let t = curld().unwrap();
		let out = t.apply(r#"hello \"world\""#, t.options()).await.unwrap();
		assert_eq!(out, r#"hello "world""#);
	}

	#[tokio::test]
	async fn leaves_other_escapes_alone() {
		let t = curld().unwrap();
		let out = t.apply(r#"a\nb\\c"#, t.options()).await.unwrap();
		assert_eq!(out, r#"a\nb\\c"#);
	}
}
