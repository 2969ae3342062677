use anyhow::Result;
use s3fs_view::Filesystem;
use tokio::io::AsyncWriteExt;

pub async fn run_cat(fs: &Filesystem, path: &str) -> Result<()> {
    let mut file = fs.open(path).await?.into_file()?;
    let mut stdout = tokio::io::stdout();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        stdout.write_all(&buf[..n]).await?;
    }
    stdout.flush().await?;
    file.close()?;
    Ok(())
}
