use enrollment_receipt::error::ExtractionError;
use enrollment_receipt::{
    logger, App, ClaimCheck, Config, PageTextExtractor, Rejection, Submission, SubmissionCtx,
    SubmissionFlow, SubmissionOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_test::assert_ok;

const RECEIPT: &str = "\
UNIVERSIDAD TECNICA NACIONAL
Comprobante de Matricula
123450678 Perez Gomez Juan Pacifico I-2025
Numero de boleta 000789
Codigo Grupo Curso Creditos Horario
ITI-221 AProgramacion I 4.00 12 0
L 08:00 11:50 Aula Edificio 12.B
ITI-222 BRedes de Computadoras 3.00 12 0
Firma 1 2 3 4 123450678
Total de creditos 7";

/// 不解析字节，直接返回固定文本的提取器
struct FixedTextExtractor(&'static str);

impl PageTextExtractor for FixedTextExtractor {
    fn extract_first_page(&self, _document: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.0.to_string())
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "enrollment_receipt_it_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_in(dir: &PathBuf) -> Config {
    Config {
        submissions_folder: dir.join("in").to_string_lossy().to_string(),
        output_folder: dir.join("out").to_string_lossy().to_string(),
        temp_dir: dir.join("temp").to_string_lossy().to_string(),
        max_concurrent_submissions: 2,
        verbose_logging: false,
        output_log_file: dir.join("output.txt").to_string_lossy().to_string(),
        rejections_file: dir.join("rejections.txt").to_string_lossy().to_string(),
    }
}

fn flow_with(config: &Config, text: &'static str) -> SubmissionFlow {
    SubmissionFlow::with_extractor(config, Arc::new(FixedTextExtractor(text)))
}

async fn run(flow: &SubmissionFlow, file_name: &str, identity: &str, term: &str) -> SubmissionOutcome {
    let submission = Submission::new(file_name, b"%PDF-1.4".to_vec(), identity, term);
    let ctx = SubmissionCtx::new(file_name, 1, identity, term);
    flow.run(&submission, &ctx).await
}

#[tokio::test]
async fn test_accepts_matching_receipt() {
    logger::init();
    let dir = scratch_dir("accept");
    let config = config_in(&dir);
    let flow = flow_with(&config, RECEIPT);

    let outcome = run(&flow, "boleta.pdf", "123450678", "2025").await;
    assert_eq!(outcome.status_code(), 200);

    let SubmissionOutcome::Accepted(record) = outcome.clone() else {
        panic!("应该通过: {:?}", outcome);
    };
    assert_eq!(record.full_name, "Perez Gomez Juan");
    assert_eq!(record.receipt_number, "000789");
    assert_eq!(record.courses.len(), 2);
    assert_eq!(record.courses[0].schedule, "L 08:00 a 11:50");
    assert_eq!(record.courses[1].schedule, "");

    let body = outcome.body();
    assert_eq!(body["cedula"], "123450678");
    assert_eq!(body["cursos"][1]["codigo"], "ITI-222");

    // 临时文件已清理
    let leftovers = std::fs::read_dir(&config.temp_dir).unwrap().count();
    assert_eq!(leftovers, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_rejects_claim_mismatch() {
    let dir = scratch_dir("mismatch");
    let config = config_in(&dir);
    let flow = flow_with(&config, RECEIPT);

    let outcome = run(&flow, "boleta.pdf", "123450678", "2024").await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Rejected(Rejection::ClaimMismatch(ClaimCheck {
            identity_matches: true,
            term_matches: false,
        }))
    );
    assert_eq!(
        outcome.body()["error"],
        "El archivo no pertenece al estudiante o el periodo es incorrecto"
    );

    let outcome = run(&flow, "boleta.pdf", "999", "I-2025").await;
    assert_eq!(outcome.status_code(), 400);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_rejects_non_pdf_name() {
    let dir = scratch_dir("notpdf");
    let config = config_in(&dir);
    let flow = flow_with(&config, RECEIPT);

    let outcome = run(&flow, "boleta.docx", "123450678", "2025").await;
    assert_eq!(outcome, SubmissionOutcome::Rejected(Rejection::NotPdf));

    let leftovers = std::fs::read_dir(&config.temp_dir).unwrap().count();
    assert_eq!(leftovers, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_rejects_text_that_is_not_a_receipt() {
    let dir = scratch_dir("notreceipt");
    let config = config_in(&dir);
    let flow = flow_with(&config, "solo\ntres\nlineas");

    let outcome = run(&flow, "boleta.pdf", "123450678", "2025").await;
    assert_eq!(outcome, SubmissionOutcome::Rejected(Rejection::NotEnrollmentReceipt));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_unreadable_pdf_is_not_a_receipt() {
    let dir = scratch_dir("garbage");
    let config = config_in(&dir);
    let flow = SubmissionFlow::new(&config);

    let submission = Submission::new("boleta.pdf", b"not a pdf at all".to_vec(), "123450678", "2025");
    let ctx = SubmissionCtx::new("boleta.pdf", 1, "123450678", "2025");
    let outcome = flow.run(&submission, &ctx).await;
    assert_eq!(outcome, SubmissionOutcome::Rejected(Rejection::NotEnrollmentReceipt));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_storage_failure_is_reported_as_500() {
    let dir = scratch_dir("storage");
    let mut config = config_in(&dir);
    // 临时目录位置上已有一个普通文件，无法在其下创建子目录
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    config.temp_dir = blocker.to_string_lossy().to_string();
    let flow = flow_with(&config, RECEIPT);

    let outcome = run(&flow, "boleta.pdf", "123450678", "2025").await;
    assert_eq!(outcome.status_code(), 500);
    assert!(matches!(
        outcome,
        SubmissionOutcome::Rejected(Rejection::StorageFailed(_))
    ));
    let body = outcome.body();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error al guardar el archivo: "), "{}", message);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_name_submissions_are_isolated() {
    let dir = scratch_dir("concurrent");
    let config = config_in(&dir);
    let flow = Arc::new(flow_with(&config, RECEIPT));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move {
                let submission =
                    Submission::new("boleta.pdf", b"%PDF-1.4".to_vec(), "123450678", "2025");
                let ctx = SubmissionCtx::new("boleta.pdf", i, "123450678", "2025");
                flow.run(&submission, &ctx).await
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.is_accepted(), "{:?}", outcome);
    }

    let leftovers = std::fs::read_dir(&config.temp_dir).unwrap().count();
    assert_eq!(leftovers, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_batch_run_writes_results_and_rejections() {
    let dir = scratch_dir("batch");
    let config = config_in(&dir);
    let input = dir.join("in");
    std::fs::create_dir_all(&input).unwrap();

    std::fs::write(input.join("boleta.pdf"), b"%PDF-1.4").unwrap();
    std::fs::write(input.join("boleta.txt"), b"texto").unwrap();
    std::fs::write(
        input.join("juan.toml"),
        "file = \"boleta.pdf\"\nidentity = \"123450678\"\nterm = 2025\n",
    )
    .unwrap();
    std::fs::write(
        input.join("otro.toml"),
        "file = \"boleta.pdf\"\nidentity = \"111111111\"\nterm = \"I-2025\"\n",
    )
    .unwrap();
    std::fs::write(
        input.join("texto.toml"),
        "file = \"boleta.txt\"\nidentity = \"123450678\"\nterm = \"I-2025\"\n",
    )
    .unwrap();
    std::fs::write(
        input.join("perdido.toml"),
        "file = \"no-existe.pdf\"\nidentity = \"123450678\"\nterm = \"I-2025\"\n",
    )
    .unwrap();

    let flow = flow_with(&config, RECEIPT);
    let app = assert_ok!(App::with_flow(config.clone(), flow).await);
    let stats = assert_ok!(app.run().await);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.failed, 1);

    let out = PathBuf::from(&config.output_folder);
    let accepted: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("juan.json")).unwrap()).unwrap();
    assert_eq!(accepted["status"], 200);
    assert_eq!(accepted["body"]["periodo"], "I-2025");

    let not_pdf: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("texto.json")).unwrap()).unwrap();
    assert_eq!(not_pdf["status"], 400);
    assert_eq!(not_pdf["body"]["error"], "El archivo no es un PDF");

    assert!(!out.join("perdido.json").exists());

    let rejections = std::fs::read_to_string(&config.rejections_file).unwrap();
    assert_eq!(rejections.lines().count(), 2);

    let run_log = std::fs::read_to_string(&config.output_log_file).unwrap();
    assert!(run_log.trim_end().ends_with("通过 1 / 拒绝 2 / 失败 1 / 共 4"));

    let _ = std::fs::remove_dir_all(&dir);
}
