use tokio::task::JoinError;

/// Extracts the panic payload of a failed task as a string.
///
/// Returns `None` when the task was cancelled rather than panicking.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	let payload = err.into_panic();
	let msg = if let Some(s) = payload.downcast_ref::<&'static str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"non-string panic payload".to_string()
	};
	Some(msg)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{TaskClass, spawn};

	async fn payload_of<F>(fut: F) -> Option<String>
	where
		F: std::future::Future<Output = ()> + Send + 'static,
	{
		let err = spawn(TaskClass::Preview, fut).await.expect_err("task should fail");
		join_error_panic_message(err)
	}

	#[tokio::test]
	async fn formatted_and_literal_payloads_are_recovered() {
		assert_eq!(payload_of(async { panic!("bad pattern") }).await.as_deref(), Some("bad pattern"));
		let limit = 3;
		assert_eq!(payload_of(async move { panic!("limit {limit} exceeded") }).await.as_deref(), Some("limit 3 exceeded"));
	}

	#[tokio::test]
	async fn opaque_payload_gets_placeholder() {
		let msg = payload_of(async { std::panic::panic_any(7_u8) }).await;
		assert_eq!(msg.as_deref(), Some("non-string panic payload"));
	}

	#[tokio::test]
	async fn aborted_task_is_not_a_panic() {
		let handle = spawn(TaskClass::Promote, std::future::pending::<()>());
		handle.abort();
		let err = handle.await.unwrap_err();
		assert_eq!(join_error_panic_message(err), None);
	}
}
