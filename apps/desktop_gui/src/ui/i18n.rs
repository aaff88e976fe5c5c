//! Display strings for the three supported languages. Only labels change with
//! the language; field values and the wire payload never do.

use intake_core::human_readable_bytes;
use shared::{
    domain::{AttachmentSlot, FieldId, HandoverLocation, YesNo},
    error::{AttachmentRejection, FieldErrorKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Japanese, Language::Chinese];

    /// Name shown in the switcher, always in the language itself.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Japanese => "日本語",
            Language::Chinese => "中文",
        }
    }

    fn pick(self, en: &'static str, ja: &'static str, zh: &'static str) -> &'static str {
        match self {
            Language::English => en,
            Language::Japanese => ja,
            Language::Chinese => zh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Title,
    Description,
    Optional,
    SelectLocation,
    ChooseFile,
    ReplaceFile,
    RemoveFile,
    NoFileSelected,
    PdfHint,
    Submit,
    Submitting,
    SubmittedTitle,
    SubmittedBody,
    FailedTitle,
    FailedBody,
    Close,
    Dismiss,
    BackendStarting,
    SubmissionUnavailable,
}

pub fn text(lang: Language, key: Text) -> &'static str {
    match key {
        Text::Title => lang.pick("EP Renewal", "EP更新申請", "EP续签申请"),
        Text::Description => lang.pick(
            "Tell us whether you are renewing your Employment Pass and provide the documents we need.",
            "雇用パスを更新するかどうかをお知らせいただき、必要な書類をご提出ください。",
            "请告知您是否续签就业准证，并提供所需文件。",
        ),
        Text::Optional => lang.pick("(optional)", "(任意)", "(可选)"),
        Text::SelectLocation => lang.pick("Select a location", "場所を選択", "选择地点"),
        Text::ChooseFile => lang.pick("Choose PDF…", "PDFを選択…", "选择PDF…"),
        Text::ReplaceFile => lang.pick("Replace…", "差し替え…", "替换…"),
        Text::RemoveFile => lang.pick("Remove", "削除", "移除"),
        Text::NoFileSelected => lang.pick("No file selected", "ファイル未選択", "未选择文件"),
        Text::PdfHint => lang.pick("PDF, up to 10 MB", "PDF、最大10MB", "PDF，最大10MB"),
        Text::Submit => lang.pick("Submit", "送信", "提交"),
        Text::Submitting => lang.pick("Submitting…", "送信中…", "提交中…"),
        Text::SubmittedTitle => lang.pick("Submitted", "送信完了", "提交成功"),
        Text::SubmittedBody => lang.pick(
            "Your renewal details were submitted. The form has been cleared.",
            "更新情報を送信しました。フォームはクリアされました。",
            "您的续签信息已提交，表格已清空。",
        ),
        Text::FailedTitle => lang.pick("Submission failed", "送信失敗", "提交失败"),
        Text::FailedBody => lang.pick(
            "Something went wrong. Your answers are still here; please try again.",
            "問題が発生しました。入力内容は保持されています。もう一度お試しください。",
            "出现问题。您填写的内容已保留，请重试。",
        ),
        Text::Close => lang.pick("OK", "OK", "确定"),
        Text::Dismiss => lang.pick("Dismiss", "閉じる", "关闭"),
        Text::BackendStarting => lang.pick(
            "Connecting to the submission service…",
            "送信サービスに接続しています…",
            "正在连接提交服务…",
        ),
        Text::SubmissionUnavailable => lang.pick(
            "Submission is unavailable:",
            "送信できません:",
            "无法提交：",
        ),
    }
}

pub fn field_label(lang: Language, field: FieldId) -> &'static str {
    match field {
        FieldId::WantsRenewal => lang.pick(
            "Do you want to renew your Employment Pass?",
            "雇用パスを更新しますか？",
            "您要续签就业准证吗？",
        ),
        FieldId::HasDependents => lang.pick(
            "Do you have dependants?",
            "扶養家族はいますか？",
            "您有家属吗？",
        ),
        FieldId::Email => lang.pick("Email", "メールアドレス", "电子邮箱"),
        FieldId::BmsNumber => lang.pick("BMS number", "BMS番号", "BMS编号"),
        FieldId::FullName => lang.pick(
            "Full name (as in passport)",
            "氏名（パスポート表記）",
            "全名（与护照一致）",
        ),
        FieldId::PassportNumber => lang.pick("Passport number", "パスポート番号", "护照号码"),
        FieldId::PassportExpiry => lang.pick(
            "Passport expiry date",
            "パスポート有効期限",
            "护照到期日",
        ),
        FieldId::IssueCountry => lang.pick("Passport issuing country", "パスポート発行国", "护照签发国"),
        FieldId::PassportIssue => lang.pick("Passport issue date", "パスポート発行日", "护照签发日"),
        FieldId::TaxNumber => lang.pick("Tax reference number", "納税者番号", "税号"),
        FieldId::HandoverLocation => lang.pick(
            "Where should the pass be handed over?",
            "パスの受け取り場所",
            "准证交付地点",
        ),
        FieldId::PassportCopy => lang.pick("Passport copy", "パスポートのコピー", "护照复印件"),
        FieldId::ContractLetter => lang.pick("Contract letter", "雇用契約書", "雇佣合同"),
        FieldId::EFilingSlip => lang.pick(
            "e-Filing / e-PIN slip",
            "e-Filing / e-PIN 控え",
            "e-Filing / e-PIN 回执",
        ),
        FieldId::Resume => lang.pick("Resume", "履歴書", "简历"),
        FieldId::Certificates => lang.pick("Certificates", "資格証明書", "证书"),
    }
}

pub fn slot_label(lang: Language, slot: AttachmentSlot) -> &'static str {
    field_label(lang, slot.field_id())
}

pub fn yes_no_label(lang: Language, value: YesNo) -> &'static str {
    match value {
        YesNo::Yes => lang.pick("Yes", "はい", "是"),
        YesNo::No => lang.pick("No", "いいえ", "否"),
    }
}

pub fn location_label(lang: Language, location: HandoverLocation) -> &'static str {
    match location {
        HandoverLocation::Office => lang.pick("Office", "オフィス", "办公室"),
        HandoverLocation::Home => lang.pick("Home", "自宅", "住所"),
        HandoverLocation::Courier => lang.pick("Courier", "宅配便", "快递"),
    }
}

pub fn field_error(lang: Language, kind: FieldErrorKind) -> &'static str {
    match kind {
        FieldErrorKind::Required => lang.pick(
            kind.default_message(),
            "この項目は必須です",
            "此项为必填项",
        ),
        FieldErrorKind::InvalidEmail => lang.pick(
            kind.default_message(),
            "有効なメールアドレスを入力してください",
            "请输入有效的电子邮箱地址",
        ),
        FieldErrorKind::InvalidDate => lang.pick(
            kind.default_message(),
            "日付は YYYY-MM-DD 形式で入力してください",
            "请按 YYYY-MM-DD 格式输入日期",
        ),
        FieldErrorKind::FileRequired => lang.pick(
            kind.default_message(),
            "この書類をアップロードしてください",
            "请上传此文件",
        ),
    }
}

pub fn rejection_message(lang: Language, rejection: &AttachmentRejection) -> String {
    match rejection {
        AttachmentRejection::NotPdf { .. } => lang
            .pick(
                "Only PDF files are accepted.",
                "PDFファイルのみ受け付けます。",
                "仅接受PDF文件。",
            )
            .to_string(),
        AttachmentRejection::TooLarge {
            size_bytes,
            limit_bytes,
        } => {
            let size = human_readable_bytes(*size_bytes);
            let limit = human_readable_bytes(*limit_bytes);
            match lang {
                Language::English => format!("File is {size}; the limit is {limit}."),
                Language::Japanese => format!("ファイルサイズは{size}です。上限は{limit}です。"),
                Language::Chinese => format!("文件大小为{size}，上限为{limit}。"),
            }
        }
        AttachmentRejection::SignatureMismatch => lang
            .pick(
                "This file does not look like a PDF.",
                "このファイルはPDFではないようです。",
                "此文件似乎不是PDF。",
            )
            .to_string(),
        AttachmentRejection::Unreadable { .. } => lang
            .pick(
                "The file could not be read.",
                "ファイルを読み込めませんでした。",
                "无法读取该文件。",
            )
            .to_string(),
    }
}
