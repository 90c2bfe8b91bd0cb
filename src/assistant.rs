//! Rule-based responder for voice queries.
//!
//! The query is lowercased and matched against an ordered keyword table;
//! the first topic whose keyword list hits wins, and the reply comes from
//! the response set for the requested language. Keywords carry English,
//! Malayalam, Tamil and Hindi equivalents, so a Malayalam query classifies
//! correctly even when the account language is English. Unknown language
//! codes fall back to the English set; an unclassified query gets the
//! per-language clarification prompt.

// ---

/// Topics the responder can answer, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Weather,
    Pest,
    Price,
    Soil,
    Crop,
}

/// Keyword equivalents per topic. Order matters: earlier rules shadow later
/// ones when a query mentions several topics.
const RULES: [(Topic, &[&str]); 5] = [
    (
        Topic::Weather,
        &["weather", "rain", "കാലാവസ്ഥ", "மழை", "मौसम"],
    ),
    (Topic::Pest, &["pest", "insect", "കീടം", "பூச்சி", "कीट"]),
    (Topic::Price, &["price", "market", "വില", "விலை", "मूल्य"]),
    (Topic::Soil, &["soil", "മണ്ണ്", "மண்", "मिट्टी"]),
    (Topic::Crop, &["crop", "plant", "വിള", "பயிர்", "फसल"]),
];

/// Canned replies for one language.
struct ResponseSet {
    // ---
    weather: &'static str,
    pest: &'static str,
    price: &'static str,
    soil: &'static str,
    crop: &'static str,
    fallback: &'static str,
}

impl ResponseSet {
    // ---
    fn reply(&self, topic: Option<Topic>) -> &'static str {
        // ---
        match topic {
            Some(Topic::Weather) => self.weather,
            Some(Topic::Pest) => self.pest,
            Some(Topic::Price) => self.price,
            Some(Topic::Soil) => self.soil,
            Some(Topic::Crop) => self.crop,
            None => self.fallback,
        }
    }
}

const ENGLISH: ResponseSet = ResponseSet {
    weather: "Based on current weather data, I recommend taking precautions for your crops due to expected heavy rainfall.",
    pest: "For pest control, try using neem oil spray during evening hours. It's effective against most common pests.",
    price: "Current market prices show rice at ₹2,800 per quintal in Ernakulam market.",
    soil: "Your soil analysis suggests moderate fertility. Consider adding organic compost to improve nutrient levels.",
    crop: "For this season, coconut and rice cultivation would be ideal based on your soil type and weather conditions.",
    fallback: "I understand you're asking about farming. Could you be more specific about weather, crops, or pest control?",
};

const MALAYALAM: ResponseSet = ResponseSet {
    weather: "നിലവിലെ കാലാവസ്ഥാ ഡാറ്റയുടെ അടിസ്ഥാനത്തിൽ, പ്രതീക്ഷിക്കുന്ന കനത്ത മഴ കാരണം നിങ്ങളുടെ വിളകൾക്ക് മുൻകരുതലുകൾ എടുക്കാൻ ഞാൻ ശുപാർശ ചെയ്യുന്നു.",
    pest: "കീടനിയന്ത്രണത്തിനായി, വൈകുന്നേരങ്ങളിൽ നീം എണ്ണ സ്പ്രേ ഉപയോഗിക്കാൻ ശ്രമിക്കുക. മിക്ക സാധാരണ കീടങ്ങൾക്കും ഇത് ഫലപ്രദമാണ്.",
    price: "നിലവിലെ മാർക്കറ്റ് വിലകൾ എറണാകുളം മാർക്കറ്റിൽ അരി ക്വിന്റലിന് ₹2,800 കാണിക്കുന്നു.",
    soil: "നിങ്ങളുടെ മണ്ണ് വിശകലനം മിതമായ ഫലഭൂയിഷ്ഠത സൂചിപ്പിക്കുന്നു. പോഷകങ്ങളുടെ അളവ് മെച്ചപ്പെടുത്താൻ ജൈവവളം ചേർക്കാൻ പരിഗണിക്കുക.",
    crop: "ഈ സീസണിൽ, നിങ്ങളുടെ മണ്ണിന്റെ തരവും കാലാവസ്ഥാ അവസ്ഥയും അടിസ്ഥാനമാക്കി തെങ്ങ്, നെൽ കൃഷി അനുയോജ്യമാകും.",
    fallback: "നിങ്ങൾ കൃഷിയെക്കുറിച്ച് ചോദിക്കുന്നുവെന്ന് ഞാൻ മനസ്സിലാക്കുന്നു. കാലാവസ്ഥ, വിളകൾ അല്ലെങ്കിൽ കീടനിയന്ത്രണത്തെക്കുറിച്ച് കൂടുതൽ വ്യക്തമാക്കാമോ?",
};

const TAMIL: ResponseSet = ResponseSet {
    weather: "தற்போதைய வானிலை தரவுகளின் அடிப்படையில், எதிர்பார்க்கப்படும் கனமழை காரணமாக உங்கள் பயிர்களுக்கு முன்னெச்சரிக்கை நடவடிக்கைகளை எடுக்க பரிந்துரைக்கிறேன்.",
    pest: "பூச்சி கட்டுப்பாட்டிற்கு, மாலை நேரங்களில் வேப்பெண்ணெய் தெளிப்பதை முயற்சிக்கவும். பொதுவான பூச்சிகளுக்கு இது பயனுள்ளதாக இருக்கும்.",
    price: "தற்போதைய சந்தை விலைகள் எர்ணாகுளம் சந்தையில் அரிசி குவிண்டாலுக்கு ₹2,800 ஐ காட்டுகிறது.",
    soil: "உங்கள் மண் பகுப்பாய்வு மிதமான வளத்தை குறிக்கிறது. ஊட்டச்சத்து அளவுகளை மேம்படுத்த கரிம உரம் சேர்ப்பதை பரிசீலிக்கவும்.",
    crop: "இந்த பருவத்தில், உங்கள் மண் வகை மற்றும் வானிலை நிலைமைகளின் அடிப்படையில் தென்னை மற்றும் நெல் சாகுபடி ஏற்றதாக இருக்கும்.",
    fallback: "நீங்கள் விவசாயத்தைப் பற்றி கேட்கிறீர்கள் என்று புரிந்துகொள்கிறேன். வானிலை, பயிர்கள் அல்லது பூச்சி கட்டுப்பாடு பற்றி மிகவும் குறிப்பிட்டுச் சொல்ல முடியுமா?",
};

const HINDI: ResponseSet = ResponseSet {
    weather: "वर्तमान मौसम डेटा के आधार पर, अपेक्षित भारी बारिश के कारण मैं आपकी फसलों के लिए सावधानियां बरतने की सलाह देता हूं।",
    pest: "कीट नियंत्रण के लिए, शाम के समय नीम तेल का छिड़काव करने का प्रयास करें। यह अधिकांश सामान्य कीटों के विरुद्ध प्रभावी है।",
    price: "वर्तमान बाजार मूल्य एर्णाकुलम बाजार में चावल ₹2,800 प्रति क्विंटल दिखाते हैं।",
    soil: "आपका मिट्टी विश्लेषण मध्यम उर्वरता का सुझाव देता है। पोषक तत्वों के स्तर को बेहतर बनाने के लिए जैविक खाद जोड़ने पर विचार करें।",
    crop: "इस मौसम के लिए, आपकी मिट्टी के प्रकार और मौसम की स्थिति के आधार पर नारियल और धान की खेती आदर्श होगी।",
    fallback: "मैं समझता हूं कि आप खेती के बारे में पूछ रहे हैं। क्या आप मौसम, फसल या कीट नियंत्रण के बारे में अधिक विशिष्ट हो सकते हैं?",
};

fn response_set(language: &str) -> &'static ResponseSet {
    // ---
    match language {
        "ml" => &MALAYALAM,
        "ta" => &TAMIL,
        "hi" => &HINDI,
        _ => &ENGLISH,
    }
}

/// First rule whose keyword list hits, if any.
fn classify(query: &str) -> Option<Topic> {
    // ---
    let query = query.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| query.contains(keyword)))
        .map(|(topic, _)| *topic)
}

/// Generate the canned reply for a voice query.
pub fn generate_response(query: &str, language: &str) -> &'static str {
    // ---
    response_set(language).reply(classify(query))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_english_weather_reply_is_exact() {
        // ---
        assert_eq!(
            generate_response("Will it rain today?", "en"),
            "Based on current weather data, I recommend taking precautions for \
             your crops due to expected heavy rainfall."
        );
    }

    #[test]
    fn test_earlier_rules_win_on_mixed_queries() {
        // ---
        // Mentions both weather and pests; weather is the higher-priority rule
        let reply = generate_response("Will rain wash away my pest spray?", "en");
        assert_eq!(reply, ENGLISH.weather);

        // Price beats soil the same way
        let reply = generate_response("market price for soil additives", "en");
        assert_eq!(reply, ENGLISH.price);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        // ---
        assert_eq!(generate_response("WEATHER FORECAST?", "en"), ENGLISH.weather);
    }

    #[test]
    fn test_keywords_match_across_languages() {
        // ---
        // A Malayalam weather keyword still classifies under an English account
        assert_eq!(
            generate_response("ഇന്ന് കാലാവസ്ഥ എങ്ങനെ?", "en"),
            ENGLISH.weather
        );

        // And an English keyword answers in Malayalam when asked to
        assert_eq!(generate_response("heavy rain expected?", "ml"), MALAYALAM.weather);
    }

    #[test]
    fn test_each_topic_resolves() {
        // ---
        assert_eq!(generate_response("insect damage on leaves", "en"), ENGLISH.pest);
        assert_eq!(generate_response("market rates today", "en"), ENGLISH.price);
        assert_eq!(generate_response("is my soil acidic", "en"), ENGLISH.soil);
        assert_eq!(generate_response("which crop should I plant", "en"), ENGLISH.crop);
    }

    #[test]
    fn test_unclassified_query_gets_clarification() {
        // ---
        assert_eq!(generate_response("hello there", "en"), ENGLISH.fallback);
        assert_eq!(generate_response("hello there", "hi"), HINDI.fallback);
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        // ---
        assert_eq!(generate_response("weather update", "fr"), ENGLISH.weather);
        assert_eq!(generate_response("weather update", ""), ENGLISH.weather);
    }

    #[test]
    fn test_price_reply_quotes_the_ernakulam_rate() {
        // ---
        assert!(generate_response("rice price", "en").contains("₹2,800"));
        assert!(generate_response("അരിയുടെ വില", "ta").contains("₹2,800"));
    }
}
