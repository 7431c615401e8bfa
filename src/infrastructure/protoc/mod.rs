//! protoc plugin wire I/O
//!
//! protoc writes an encoded `CodeGeneratorRequest` to the plugin's stdin and
//! expects an encoded `CodeGeneratorResponse` on stdout.

use std::path::Path;

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::core::error::Result;

/// Decode a request from any async reader (stdin in production).
pub async fn read_request<R>(mut reader: R) -> Result<CodeGeneratorRequest>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(CodeGeneratorRequest::decode(buf.as_slice())?)
}

/// Decode a request previously captured to a file.
pub async fn read_request_file(path: &Path) -> Result<CodeGeneratorRequest> {
    let file = tokio::fs::File::open(path).await?;
    read_request(file).await
}

/// Encode a response onto any async writer and flush it.
pub async fn write_response<W>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&response.encode_to_vec()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use prost_types::compiler::code_generator_response::File;

    #[tokio::test]
    async fn test_read_request_decodes_bytes() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".to_string()],
            parameter: Some("root=/tmp".to_string()),
            ..Default::default()
        };
        let bytes = request.encode_to_vec();

        let decoded = read_request(bytes.as_slice()).await.unwrap();
        assert_eq!(decoded, request);
    }

    #[tokio::test]
    async fn test_read_request_rejects_garbage() {
        let garbage: &[u8] = &[0xff, 0xff, 0xff];
        let result = read_request(garbage).await;
        assert!(matches!(result, Err(Error::Protobuf(_))));
    }

    #[tokio::test]
    async fn test_write_response_round_trip() {
        let response = CodeGeneratorResponse {
            file: vec![File {
                name: Some("index.html".to_string()),
                content: Some("<p>hi</p>".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut out = Vec::new();
        write_response(&mut out, &response).await.unwrap();
        assert_eq!(CodeGeneratorResponse::decode(out.as_slice()).unwrap(), response);
    }
}
