//! Narration and error text
//!
//! The engine never builds strings itself. It describes what happened as a
//! [`Message`] and a [`MessageCatalog`] turns that into a status line. Two
//! catalogs ship with the crate (see [`Language`]); hosts can supply their
//! own.
//!
//! Marking interpolated values as left-to-right inside right-to-left text is
//! the catalog's job, not the engine's.

mod format;

pub use format::{format_cell, format_number};

use std::env;

/// Left-to-right mark
const LRM: char = '\u{200e}';

/// Everything the engine or the host may need to say
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PushingOperand { value: f64 },
    PushingOperator { symbol: &'static str, arity: usize },
    EvaluatingConstant { symbol: &'static str },
    EvaluatingUnaryOperation { symbol: &'static str, operand: f64 },
    EvaluatingOperation { symbol: &'static str, lhs: f64, rhs: f64 },
    PushingOperationResult { value: f64 },
    ExpressionResult { value: f64 },
    ExpectedOperandForUnary { symbol: &'static str },
    ExpectedOperandForBinary { symbol: &'static str },
    NotValidAsUnary { symbol: &'static str },
    MismatchedParentheses,
    InvalidSyntax,
    DiscardLeftParenthesis,
    ArgumentSeparator,
    EvaluatingExpression { expression: String },
    CanvasHeightWarning,
    /// Engine bug; never recorded as a step
    InternalError { symbol: &'static str },

    // Interface labels and host status
    OperationsLabel,
    OutputLabel,
    NarrationLabel,
    ExpressionInputLabel,
    SupportedOperations,
    EnterExpressionHint,
    Ready,
    EnterExpression,
    Playing,
    Paused,
    PlaybackComplete,
    ReplayHint,
    SteppedForward,
    SteppedBackward,
    AtLastStep,
    AtFirstStep,
    NoExpression,
    NothingToEvaluate,
    EditingExpression,
    EditCancelled,
    SpeedChanged { millis: u64 },
    LanguageChanged { name: &'static str },
}

/// Turns a [`Message`] into display text
pub trait MessageCatalog {
    fn format(&self, message: &Message) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Built-in catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Native name, for language pickers
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "العربية",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::English => TextDirection::LeftToRight,
            Language::Arabic => TextDirection::RightToLeft,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Pick a language from an explicit code, else from the locale
    /// environment (`LC_ALL`, `LC_MESSAGES`, `LANG`); Arabic locales get
    /// Arabic, everything else English.
    pub fn detect(explicit: Option<&str>) -> Self {
        if let Some(lang) = explicit.and_then(Self::from_code) {
            return lang;
        }

        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty());

        match locale {
            Some(locale) if locale.to_ascii_lowercase().starts_with("ar") => Language::Arabic,
            _ => Language::English,
        }
    }

    /// The other built-in language
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }

    /// Wrap embedded left-to-right text so it survives bidi reordering
    fn isolate(self, text: &str) -> String {
        match self.direction() {
            TextDirection::LeftToRight => text.to_string(),
            TextDirection::RightToLeft => format!("{LRM}{text}{LRM}"),
        }
    }

    fn format_english(self, message: &Message) -> String {
        match message {
            Message::PushingOperand { value } => {
                format!("Pushing operand {} to output stack", format_number(*value))
            }
            Message::PushingOperator { symbol, arity } => {
                let label = if *arity > 0 || symbol.contains(['(', ')']) {
                    "operator"
                } else {
                    "constant"
                };
                format!("Pushing {label} '{symbol}' to operations stack")
            }
            Message::EvaluatingConstant { symbol } => format!("Evaluating constant '{symbol}'"),
            Message::EvaluatingUnaryOperation { symbol, operand } => {
                format!("Evaluating operation {}", self.unary_expression(symbol, *operand))
            }
            Message::EvaluatingOperation { symbol, lhs, rhs } => {
                format!("Evaluating operation '{}'", self.binary_expression(symbol, *lhs, *rhs))
            }
            Message::PushingOperationResult { value } => format!(
                "Pushing operation result '{}' to output stack",
                format_number(*value)
            ),
            Message::ExpressionResult { value } => format!(
                "Expression evaluation finished. Result is '{}'",
                format_number(*value)
            ),
            Message::ExpectedOperandForUnary { symbol } => {
                format!("Found no operand for operator '{symbol}', which takes one operand")
            }
            Message::ExpectedOperandForBinary { symbol } => {
                format!("Found no operands for operator '{symbol}', which takes two operands")
            }
            Message::NotValidAsUnary { symbol } => {
                let mut msg = format!("Operator '{symbol}' is not valid as unary");
                if symbol.contains(['+', '-']) {
                    msg.push_str(" here");
                }
                msg
            }
            Message::MismatchedParentheses => "Mismatched parentheses".to_string(),
            Message::InvalidSyntax => "Invalid syntax".to_string(),
            Message::DiscardLeftParenthesis => "Popping left parenthesis".to_string(),
            Message::ArgumentSeparator => {
                "Argument separator: evaluating up to the left parenthesis".to_string()
            }
            Message::EvaluatingExpression { expression } => format!("Evaluating \"{expression}\""),
            Message::CanvasHeightWarning => {
                "Terminal is not high enough to draw all data - enlarge the window".to_string()
            }
            Message::InternalError { symbol } => {
                format!("BUG: Calling a callback on '{symbol}'")
            }
            Message::OperationsLabel => "Operations".to_string(),
            Message::OutputLabel => "Output".to_string(),
            Message::NarrationLabel => "Narration".to_string(),
            Message::ExpressionInputLabel => "Expression".to_string(),
            Message::SupportedOperations => "Supported operations".to_string(),
            Message::EnterExpressionHint => "(press e to enter an expression)".to_string(),
            Message::Ready => "Ready!".to_string(),
            Message::EnterExpression => "Enter an expression".to_string(),
            Message::Playing => "Playing...".to_string(),
            Message::Paused => "Paused".to_string(),
            Message::PlaybackComplete => "Playback complete".to_string(),
            Message::ReplayHint => "Playback complete; press p to replay".to_string(),
            Message::SteppedForward => "Stepped forward".to_string(),
            Message::SteppedBackward => "Stepped backward".to_string(),
            Message::AtLastStep => "Cannot step forward: at the last step".to_string(),
            Message::AtFirstStep => "Cannot step backward: at the first step".to_string(),
            Message::NoExpression => "No expression loaded".to_string(),
            Message::NothingToEvaluate => "Nothing to evaluate".to_string(),
            Message::EditingExpression => "Editing expression".to_string(),
            Message::EditCancelled => "Edit cancelled".to_string(),
            Message::SpeedChanged { millis } => format!("Speed: {millis}ms per step"),
            Message::LanguageChanged { name } => format!("Language: {name}"),
        }
    }

    fn format_arabic(self, message: &Message) -> String {
        match message {
            Message::PushingOperand { value } => {
                format!("دفع المعامل {} إلى مكدس المخرجات", format_number(*value))
            }
            Message::PushingOperator { symbol, arity } => {
                let label = if *arity > 0 || symbol.contains(['(', ')']) {
                    "العملية"
                } else {
                    "الثابت"
                };
                format!("دفع {label} '{}' إلى مكدس العمليات", self.isolate(symbol))
            }
            Message::EvaluatingConstant { symbol } => {
                format!("حساب الثابت '{}'", self.isolate(symbol))
            }
            Message::EvaluatingUnaryOperation { symbol, operand } => {
                format!("حساب العملية {}", self.unary_expression(symbol, *operand))
            }
            Message::EvaluatingOperation { symbol, lhs, rhs } => {
                format!("حساب العملية '{}'", self.binary_expression(symbol, *lhs, *rhs))
            }
            Message::PushingOperationResult { value } => format!(
                "دفع نتيجة العملية '{}' إلى مكدس المخرجات",
                format_number(*value)
            ),
            Message::ExpressionResult { value } => format!(
                "تم حساب نتيجة التعبير. النتيجة هي '{}'",
                format_number(*value)
            ),
            Message::ExpectedOperandForUnary { symbol } => format!(
                "تعذر إيجاد معامل لعملية '{}'، والتي تأخذ معاملا واحدا",
                self.isolate(symbol)
            ),
            Message::ExpectedOperandForBinary { symbol } => format!(
                "تعذر إيجاد معاملات لعملية '{}'، والتي تأخذ معاملين",
                self.isolate(symbol)
            ),
            Message::NotValidAsUnary { symbol } => {
                let mut msg = format!("العملية '{}' غير صالحة كعملية أحادية", self.isolate(symbol));
                if symbol.contains(['+', '-']) {
                    msg.push_str(" هنا");
                }
                msg
            }
            Message::MismatchedParentheses => "هناك أقواس ناقصة".to_string(),
            Message::InvalidSyntax => "هناك خطأ في التعبير".to_string(),
            Message::DiscardLeftParenthesis => "طرح القوس الأيسر".to_string(),
            Message::ArgumentSeparator => "فاصل المعاملات: حساب ما قبله حتى القوس الأيسر".to_string(),
            Message::EvaluatingExpression { expression } => {
                format!("حساب التعبير \"{}\"", self.isolate(expression))
            }
            Message::CanvasHeightWarning => {
                "ارتفاع الطرفية غير كافٍ لرسم كل البيانات - قم بتكبير النافذة".to_string()
            }
            Message::InternalError { symbol } => {
                format!("BUG: Calling a callback on '{}'", self.isolate(symbol))
            }
            Message::OperationsLabel => "مكدس العمليات".to_string(),
            Message::OutputLabel => "مكدس المخرجات".to_string(),
            Message::NarrationLabel => "الشرح".to_string(),
            Message::ExpressionInputLabel => "التعبير الرياضي".to_string(),
            Message::SupportedOperations => "العمليات المدعومة".to_string(),
            Message::EnterExpressionHint => "(اضغط e لإدخال تعبير)".to_string(),
            Message::Ready => "جاهز!".to_string(),
            Message::EnterExpression => "أدخل تعبيرا رياضيا".to_string(),
            Message::Playing => "جارٍ التشغيل...".to_string(),
            Message::Paused => "متوقف مؤقتا".to_string(),
            Message::PlaybackComplete => "اكتمل التشغيل".to_string(),
            Message::ReplayHint => "اكتمل التشغيل؛ اضغط p لإعادة التشغيل".to_string(),
            Message::SteppedForward => "خطوة إلى الأمام".to_string(),
            Message::SteppedBackward => "خطوة إلى الخلف".to_string(),
            Message::AtLastStep => "لا يمكن التقدم: هذه الخطوة الأخيرة".to_string(),
            Message::AtFirstStep => "لا يمكن الرجوع: هذه الخطوة الأولى".to_string(),
            Message::NoExpression => "لم يتم إدخال أي تعبير".to_string(),
            Message::NothingToEvaluate => "لا يوجد ما يمكن حسابه".to_string(),
            Message::EditingExpression => "تعديل التعبير".to_string(),
            Message::EditCancelled => "تم إلغاء التعديل".to_string(),
            Message::SpeedChanged { millis } => {
                format!("السرعة: {} لكل خطوة", self.isolate(&format!("{millis}ms")))
            }
            Message::LanguageChanged { name } => format!("اللغة: {name}"),
        }
    }

    /// `5!` for postfix factorial, `sqrt(16)` for prefix functions
    fn unary_expression(self, symbol: &str, operand: f64) -> String {
        let operand = format_number(operand);
        let expr = if symbol == "!" {
            format!("'{operand}{symbol}'")
        } else {
            format!("'{symbol}({operand})'")
        };
        self.isolate(&expr)
    }

    fn binary_expression(self, symbol: &str, lhs: f64, rhs: f64) -> String {
        self.isolate(&format!(
            "{} {symbol} {}",
            format_number(lhs),
            format_number(rhs)
        ))
    }
}

impl MessageCatalog for Language {
    fn format(&self, message: &Message) -> String {
        match self {
            Language::English => self.format_english(message),
            Language::Arabic => self.format_arabic(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_narration() {
        let en = Language::English;
        assert_eq!(
            en.format(&Message::PushingOperand { value: 5.0 }),
            "Pushing operand 5 to output stack"
        );
        assert_eq!(
            en.format(&Message::EvaluatingOperation {
                symbol: "+",
                lhs: 2.0,
                rhs: 3.0
            }),
            "Evaluating operation '2 + 3'"
        );
        assert_eq!(
            en.format(&Message::ExpressionResult { value: 20.0 }),
            "Expression evaluation finished. Result is '20'"
        );
    }

    #[test]
    fn test_pushing_operator_labels() {
        let en = Language::English;
        assert_eq!(
            en.format(&Message::PushingOperator {
                symbol: "PI",
                arity: 0
            }),
            "Pushing constant 'PI' to operations stack"
        );
        assert_eq!(
            en.format(&Message::PushingOperator {
                symbol: "(",
                arity: 0
            }),
            "Pushing operator '(' to operations stack"
        );
        assert_eq!(
            en.format(&Message::PushingOperator {
                symbol: "*",
                arity: 2
            }),
            "Pushing operator '*' to operations stack"
        );
    }

    #[test]
    fn test_unary_forms() {
        let en = Language::English;
        assert_eq!(
            en.format(&Message::EvaluatingUnaryOperation {
                symbol: "!",
                operand: 5.0
            }),
            "Evaluating operation '5!'"
        );
        assert_eq!(
            en.format(&Message::EvaluatingUnaryOperation {
                symbol: "sqrt",
                operand: 16.0
            }),
            "Evaluating operation 'sqrt(16)'"
        );
    }

    #[test]
    fn test_not_valid_as_unary_suffix() {
        let en = Language::English;
        assert_eq!(
            en.format(&Message::NotValidAsUnary { symbol: "-" }),
            "Operator '-' is not valid as unary here"
        );
        assert_eq!(
            en.format(&Message::NotValidAsUnary { symbol: "*" }),
            "Operator '*' is not valid as unary"
        );
    }

    #[test]
    fn test_arabic_marks_embedded_expressions() {
        let ar = Language::Arabic;
        let text = ar.format(&Message::EvaluatingOperation {
            symbol: "-",
            lhs: 0.0,
            rhs: 5.0,
        });
        assert!(text.contains("\u{200e}0 - 5\u{200e}"));
        assert!(text.starts_with("حساب العملية"));

        let english = Language::English.format(&Message::EvaluatingOperation {
            symbol: "-",
            lhs: 0.0,
            rhs: 5.0,
        });
        assert!(!english.contains('\u{200e}'));
    }

    #[test]
    fn test_interface_labels_follow_language() {
        assert_eq!(Language::English.format(&Message::OutputLabel), "Output");
        assert_eq!(Language::Arabic.format(&Message::OutputLabel), "مكدس المخرجات");
        assert_eq!(
            Language::English.format(&Message::SpeedChanged { millis: 250 }),
            "Speed: 250ms per step"
        );
        assert!(Language::Arabic
            .format(&Message::SpeedChanged { millis: 250 })
            .contains("\u{200e}250ms\u{200e}"));
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("ar"), Some(Language::Arabic));
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::detect(Some("ar")), Language::Arabic);
        assert_eq!(Language::English.toggled(), Language::Arabic);
        assert_eq!(Language::Arabic.direction(), TextDirection::RightToLeft);
    }
}
