//! Activity suggestions for a weather condition, temperature and location.
//!
//! Curated location highlights always come first. General weather and
//! temperature suggestions only fill the remaining slots.

/// Maximum number of suggestions returned.
const MAX_RECOMMENDATIONS: usize = 5;

/// A suggested activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub activity: &'static str,
    /// Curated for the requested location rather than derived from the weather.
    pub location_specific: bool,
}

/// Curated highlights, matched by substring of the lower-cased location.
/// The first matching entry wins.
const LOCATION_ACTIVITIES: &[(&[&str], &[&str])] = &[
    (
        &["manila"],
        &[
            "Visit Intramuros",
            "Manila Ocean Park",
            "National Museum visit",
            "Manila Bay sunset viewing",
            "Shop at SM Mall of Asia",
            "Binondo food tour",
            "Visit Rizal Park",
            "BGC art installations",
        ],
    ),
    (
        &["quezon"],
        &[
            "Visit Quezon Memorial Circle",
            "Art in Island museum",
            "La Mesa Eco Park",
            "Maginhawa food trip",
            "Ninoy Aquino Parks & Wildlife",
            "UP Diliman campus tour",
            "Eastwood City nightlife",
        ],
    ),
    (
        &["makati"],
        &[
            "Ayala Museum visit",
            "Greenbelt shopping",
            "Poblacion food crawl",
            "Salcedo weekend market",
            "Ayala Triangle Gardens",
            "Legazpi Sunday market",
            "Makati Circuit karting",
        ],
    ),
    (
        &["pasay"],
        &[
            "SMX Convention Center",
            "Cultural Center visit",
            "Star City amusement park",
            "World Trade Center events",
            "DreamPlay by DreamWorks",
            "Mall of Asia ferris wheel",
        ],
    ),
    (
        &["taguig", "bgc"],
        &[
            "Venice Grand Canal Mall",
            "Mind Museum visit",
            "BGC arts tour",
            "High Street shopping",
            "Track 30th dining",
            "Uptown Bonifacio nightlife",
        ],
    ),
    (
        &["tagaytay"],
        &[
            "Taal Volcano viewing",
            "Sky Ranch amusement park",
            "Picnic Grove visit",
            "Mahogany Market food trip",
            "People's Park in the Sky",
            "Sonya's Garden dining",
            "Bag of Beans coffee",
        ],
    ),
    (
        &["baguio"],
        &[
            "Burnham Park visit",
            "Strawberry picking",
            "BenCab Museum tour",
            "Night market shopping",
            "Camp John Hay walk",
            "Mines View Park",
            "The Mansion visit",
            "Good Shepherd treats",
        ],
    ),
    (
        &["cebu"],
        &[
            "Magellan's Cross visit",
            "Whale shark watching",
            "Fort San Pedro tour",
            "Temple of Leah",
            "Tops Lookout view",
            "Cebu food crawl",
            "Bantayan Island day trip",
            "Kawasan Falls canyoneering",
        ],
    ),
    (
        &["boracay"],
        &[
            "White Beach relaxation",
            "Island hopping tour",
            "Parasailing adventure",
            "D'Mall shopping",
            "Puka Shell Beach visit",
            "Sunset sailing",
            "Pub crawl in Station 2",
            "Cliff diving at Ariel's Point",
        ],
    ),
    (
        &["palawan", "puerto"],
        &[
            "Underground River tour",
            "Island hopping",
            "Honda Bay visit",
            "Firefly watching",
            "Iwahig River cruise",
            "El Nido island tours",
            "Coron lagoon hopping",
            "Calauit Safari tour",
        ],
    ),
    (
        &["batangas"],
        &[
            "Anilao diving spots",
            "Taal Heritage Town",
            "Masasa Beach visit",
            "Fortune Island day trip",
            "Caleruega Church visit",
            "Laiya beach resorts",
            "Verde Island diving",
        ],
    ),
    (
        &["davao"],
        &[
            "Philippine Eagle Center",
            "Eden Nature Park visit",
            "D'Bone Collector Museum",
            "Davao Crocodile Park",
            "Jack's Ridge viewpoint",
            "Samal Island day trip",
            "Durian sampling tour",
            "Mt. Apo trekking base",
        ],
    ),
    (
        &["iloilo"],
        &[
            "Miagao Church visit",
            "Garin Farm pilgrimage",
            "Islas de Gigantes tour",
            "Guimaras Island trip",
            "Molo Mansion visit",
            "Iloilo River Esplanade",
            "La Paz Batchoy tasting",
        ],
    ),
    (
        &["bacolod"],
        &[
            "The Ruins visit",
            "Lakawon Island trip",
            "Campuestohan Highland Resort",
            "Mambukal Mountain Resort",
            "Balay Negrense Museum",
            "Capitol Park and Lagoon",
            "Local chicken inasal tour",
        ],
    ),
    (
        &["siargao"],
        &[
            "Cloud 9 surfing",
            "Magpupungko rock pools",
            "Sugba Lagoon trip",
            "Sohoton Cove tour",
            "Island hopping adventure",
            "Coconut Road bike ride",
            "Kermit surf lessons",
        ],
    ),
    (
        &["bohol"],
        &[
            "Chocolate Hills viewing",
            "Tarsier Sanctuary visit",
            "Loboc River cruise",
            "Panglao Island beaches",
            "Balicasag Island diving",
            "Hinagdanan Cave tour",
            "Man-made forest drive",
        ],
    ),
    (
        &["vigan"],
        &[
            "Calle Crisologo walk",
            "Bantay Bell Tower visit",
            "Heritage village tour",
            "Kalesa ride",
            "Hidden Garden visit",
            "Vigan empanada tasting",
            "Pottery making demonstration",
        ],
    ),
    (
        &["zambales"],
        &[
            "Anawangin Cove camping",
            "Capones Island visit",
            "Nagsasa Cove hike",
            "Potipot Island swimming",
            "Pundaquit beach surfing",
            "Mount Pinatubo trekking",
            "Crystal Beach resort",
        ],
    ),
    (
        &["coron"],
        &[
            "Kayangan Lake visit",
            "Twin Lagoon tour",
            "Shipwreck diving",
            "Maquinit Hot Springs",
            "Mt. Tapyas hiking",
            "Barracuda Lake diving",
            "Malcapuya Island hopping",
        ],
    ),
    (
        &["el nido"],
        &[
            "Big Lagoon kayaking",
            "Small Lagoon swimming",
            "Nacpan Beach visit",
            "Island hopping Tour A",
            "Secret Beach snorkeling",
            "Las Cabañas Beach sunset",
            "Taraw Cliff climbing",
        ],
    ),
    (
        &["la union", "elyu"],
        &[
            "San Juan surfing lessons",
            "Tangadan Falls hike",
            "Grape farm tour",
            "Poro Point Lighthouse",
            "Flotsam & Jetsam visit",
            "Ma-Cho Temple tour",
            "Urbiztondo beach walk",
        ],
    ),
    (
        &["dumaguete"],
        &[
            "Rizal Boulevard stroll",
            "Apo Island diving",
            "Casaroro Falls hike",
            "Twin Lakes tour",
            "Silliman University visit",
            "Sans Rival Bistro treats",
            "Manjuyod Sandbar trip",
        ],
    ),
    (
        &["sagada"],
        &[
            "Hanging Coffins tour",
            "Sumaguing Cave exploring",
            "Kiltepan Peak sunrise",
            "Echo Valley hiking",
            "Bokong Falls swim",
            "Sagada pottery shopping",
            "Blue Soil Hills visit",
        ],
    ),
];

/// Curated activities for `location`, empty when none match.
pub fn location_activities(location: &str) -> &'static [&'static str] {
    let location = location.to_lowercase();
    LOCATION_ACTIVITIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| location.contains(k)))
        .map(|(_, activities)| *activities)
        .unwrap_or(&[])
}

/// General suggestions from the condition text and temperature.
pub fn weather_activities(condition: &str, temperature: f64) -> Vec<&'static str> {
    let condition = condition.to_lowercase();
    let mut activities = Vec::new();

    if condition.contains("clear") {
        activities.extend(["Outdoor dining", "Photography"]);
    } else if condition.contains("rain") || condition.contains("drizzle") {
        activities.extend(["Museum visits", "Shopping malls", "Indoor restaurants"]);
    } else if condition.contains("cloud") {
        activities.extend(["Sightseeing", "Park visits", "City tours"]);
    } else if condition.contains("thunderstorm") {
        activities.extend(["Stay indoors", "Visit local cafes", "Spa day"]);
    }

    if temperature > 30.0 {
        activities.extend(["Swimming", "Ice cream shops", "Air-conditioned venues"]);
    } else if temperature > 25.0 {
        activities.extend(["Light hiking", "Outdoor cafes"]);
    } else {
        activities.extend(["Hot beverages", "Nature walks"]);
    }

    activities
}

/// Up to five unique suggestions, location highlights first.
pub fn recommend(condition: &str, temperature: f64, location: &str) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Vec::with_capacity(MAX_RECOMMENDATIONS);

    for activity in location_activities(location) {
        if recommendations.len() == MAX_RECOMMENDATIONS {
            break;
        }
        recommendations.push(Recommendation {
            activity,
            location_specific: true,
        });
    }

    for activity in weather_activities(condition, temperature) {
        if recommendations.len() == MAX_RECOMMENDATIONS {
            break;
        }
        if recommendations.iter().any(|r| r.activity == activity) {
            continue;
        }
        recommendations.push(Recommendation {
            activity,
            location_specific: false,
        });
    }

    recommendations
}
