// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in demo scenarios.
//!
//! Each scenario pairs an initial camera with an animation script and,
//! for the model demo, glTF assets placed before playback starts.

use geotour_camera::{Camera, LatLngAltitude};
use geotour_script::{AltitudeMode, ModelOptions};

const PLANE_URL: &str =
    "https://storage.googleapis.com/gmp-maps-demos/p3d-map/assets/Airplane.glb";
const PLANE_SCALE: f64 = 0.05;

/// A named, self-contained demo tour.
pub struct Scenario {
    /// Short name used on the command line
    pub name: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// Camera pose before the animation starts
    pub initial_camera: Camera,
    /// The animation script to play
    pub script: &'static str,
    /// Models placed on the map before playback
    pub models: Vec<ModelOptions>,
}

fn camera(
    latitude: f64,
    longitude: f64,
    altitude: f64,
    heading: f64,
    tilt: f64,
    range: f64,
) -> Camera {
    Camera::new(
        LatLngAltitude::new(latitude, longitude, altitude),
        heading,
        tilt,
        range,
    )
}

/// The full scenario catalogue, in menu order.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "tower_bridge",
            title: "Tower Bridge orbit",
            initial_camera: camera(51.5057832, -0.0751902, 5.6035, -16.36154, 0.0, 20000.0),
            script: "delay=dur=2000;\
                     flyTo=lat=51.5057832,lng=-0.0751902,alt=5.6035,hdg=-16.36154,tilt=65,range=564,dur=3500;\
                     delay=dur=1500;\
                     flyAround=lat=51.5057832,lng=-0.0751902,alt=5.6035,hdg=-16.36154,tilt=65,range=564,dur=5000,count=1",
            models: Vec::new(),
        },
        Scenario {
            name: "nyc",
            title: "Empire State Building tour",
            initial_camera: camera(51.4045642, -94.023074, 100.0, 0.0, 0.0, 15_000_000.0),
            script: "delay=dur=2000;\
                     flyTo=lat=40.748392,lng=-73.986060,alt=174.1,hdg=26.3,tilt=67,range=3977,dur=4500;\
                     delay=dur=2000;\
                     flyTo=lat=40.748392,lng=-73.986060,alt=174.1,hdg=26.3,tilt=67,range=1000,dur=1500;\
                     delay=dur=750;\
                     flyTo=lat=40.748392,lng=-73.986060,alt=174.1,hdg=75.0,tilt=67,range=1000,dur=2000;\
                     delay=dur=750;\
                     flyTo=lat=40.748392,lng=-73.986060,alt=174.1,hdg=0.0,tilt=60,range=1000,dur=2000;\
                     delay=dur=750;\
                     flyTo=lat=40.748392,lng=-73.986060,alt=174.1,hdg=0.0,tilt=60,range=2500,dur=1500;\
                     delay=dur=1500",
            models: Vec::new(),
        },
        Scenario {
            name: "fly_to",
            title: "Bondi Beach to Sydney Eye",
            initial_camera: camera(-33.891984, 151.273785, 13.3, 274.5, 71.0, 3508.0),
            script: "delay=dur=2000;\
                     flyTo=lat=-33.868670,lng=151.204183,alt=39.6,hdg=293.8,tilt=69,range=1512,dur=2500;\
                     delay=dur=2000",
            models: Vec::new(),
        },
        Scenario {
            name: "fly_around",
            title: "Delicate Arch orbit",
            initial_camera: camera(
                36.10145879,
                -112.10555998,
                774.39,
                33.198,
                74.036,
                9180.62,
            ),
            script: "delay=dur=3000;\
                     flyTo=lat=38.743502,lng=-109.499374,alt=1467,hdg=-10.4,tilt=58.1,range=138.2,dur=3500;\
                     delay=dur=2000;\
                     flyAround=lat=38.743502,lng=-109.499374,alt=1467,hdg=-10.4,tilt=58.1,range=138.2,dur=6000,count=2;\
                     delay=dur=2000",
            models: Vec::new(),
        },
        Scenario {
            name: "markers",
            title: "Berlin altitude-mode markers",
            initial_camera: camera(52.51974795, 13.40715553, 150.0, 252.7, 79.0, 1500.0),
            script: "addMarker=id=m_absolute,lat=52.519606,lng=13.406867,alt=150,label=\"absolute\",altMode=absolute;\
                     addMarker=id=m_relative,lat=52.519882,lng=13.407411,alt=50,label=\"relative\",altMode=relativeToGround;\
                     addMarker=id=m_clamped,lat=52.520276,lng=13.408272,alt=5,label=\"clamped\",altMode=clampToGround;\
                     addMarker=id=m_mesh,lat=52.520835,lng=13.409427,alt=10,label=\"mesh\",altMode=relativeToMesh;\
                     delay=dur=2000;\
                     flyTo=lat=52.522255,lng=13.405010,alt=84.0,hdg=312.8,tilt=66,range=1621,dur=2000;\
                     delay=dur=3000",
            models: Vec::new(),
        },
        Scenario {
            name: "polyline",
            title: "Chicago Riverwalk line",
            initial_camera: camera(41.886251, -87.628896, 367.3, 190.5, 71.0, 19962.0),
            script: "addPolyline=id=riverwalk,points=\"41.888813,-87.623450;41.888694,-87.625880;41.888920,-87.628248;41.889001,-87.630449;41.888875,-87.632727;41.887514,-87.633953\",color=\"#FF0288D1\",width=6,altMode=clampToGround;\
                     delay=dur=1000;\
                     flyTo=lat=41.901229,lng=-87.621649,alt=179.6,hdg=169.0,tilt=71,range=4145,dur=2500;\
                     delay=dur=1000",
            models: Vec::new(),
        },
        Scenario {
            name: "polygon",
            title: "Central Park outline",
            initial_camera: camera(40.7829, -73.9654, 100.0, 0.0, 30.0, 8000.0),
            script: "flyTo=lat=40.7829,lng=-73.9654,alt=100,hdg=0,tilt=30,range=5000,dur=5000;\
                     addPolygon=id=central_park,outerPoints=\"40.7960,-73.9580;40.7639,-73.9720;40.7675,-73.9820;40.8000,-73.9670\",fillColor=\"#8000FF00\",strokeColor=\"#FF008000\",strokeWidth=2.0,altMode=clampToGround;\
                     message=\"Central Park\";\
                     delay=dur=5000",
            models: Vec::new(),
        },
        Scenario {
            name: "model",
            title: "Airplane over the Alps",
            initial_camera: camera(47.133971, 11.333161, 2200.0, 221.4, 25.0, 30000.0),
            script: "delay=dur=1000;\
                     flyTo=lat=47.133971,lng=11.333161,alt=2200,hdg=221.4,tilt=65,range=1200,dur=3500;\
                     flyAround=lat=47.133971,lng=11.333161,alt=2200,hdg=221.4,tilt=65,range=1200,dur=3500,count=0.5;\
                     delay=dur=1000",
            models: vec![ModelOptions {
                id: "plane_main".to_owned(),
                position: LatLngAltitude::new(47.133971, 11.333161, 2200.0),
                url: PLANE_URL.to_owned(),
                scale: [PLANE_SCALE, PLANE_SCALE, PLANE_SCALE],
                orientation: [41.5, -90.0, 0.0],
                altitude_mode: AltitudeMode::Absolute,
            }],
        },
    ]
}

/// Look up a scenario by its command-line name.
pub fn find(name: &str) -> Option<Scenario> {
    scenarios().into_iter().find(|scenario| scenario.name == name)
}
