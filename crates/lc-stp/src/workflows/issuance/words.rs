//! Numeric-to-English-words conversion on the Indian numbering scale
//! (thousand, lakh, crore), used by the draft and message renderers.

const ONES: [&str; 20] = [
    "", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN", "ELEVEN",
    "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN", "NINETEEN",
];

const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

fn integer_words(value: u64) -> String {
    if value < 20 {
        return ONES[value as usize].to_string();
    }
    if value < HUNDRED {
        let tens = TENS[(value / 10) as usize];
        let rest = value % 10;
        return if rest == 0 {
            tens.to_string()
        } else {
            format!("{tens} {}", ONES[rest as usize])
        };
    }

    let (scale, name) = if value >= CRORE {
        (CRORE, "CRORE")
    } else if value >= LAKH {
        (LAKH, "LAKH")
    } else if value >= THOUSAND {
        (THOUSAND, "THOUSAND")
    } else {
        (HUNDRED, "HUNDRED")
    };

    let head = integer_words(value / scale);
    let remainder = value % scale;
    if remainder == 0 {
        format!("{head} {name}")
    } else {
        format!("{head} {name} {}", integer_words(remainder))
    }
}

/// Convert an amount into uppercase English words on the Indian scale. The
/// fractional part is rendered as "AND NN/100". Zero, negative, and
/// non-finite inputs all collapse to "ZERO".
pub fn amount_in_words(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "ZERO".to_string();
    }

    // Work in paise to dodge float drift on the fractional part.
    let total_paise = (amount * 100.0).round() as u64;
    let rupees = total_paise / 100;
    let paise = total_paise % 100;

    if rupees == 0 && paise == 0 {
        return "ZERO".to_string();
    }

    let whole = if rupees == 0 {
        "ZERO".to_string()
    } else {
        integer_words(rupees)
    };

    if paise == 0 {
        whole
    } else {
        format!("{whole} AND {paise:02}/100")
    }
}
